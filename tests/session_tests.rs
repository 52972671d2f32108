use approx::assert_relative_eq;
use streamplot_rs::api::{ChannelRegistry, PlotSession, TickContext};
use streamplot_rs::core::{AxisMode, AxisSlot, ChannelId, Sample};

fn registry_with_ramp(channel: ChannelId, count: usize) -> ChannelRegistry {
    let registry = ChannelRegistry::new();
    registry.register(channel, 64).expect("register");
    for i in 0..count {
        registry
            .append(channel, Sample::new(i as f64, (i as f64) * 2.0))
            .expect("append");
    }
    registry
}

#[test]
fn add_channel_is_idempotent_and_updates_slot() {
    let mut session = PlotSession::new("scope");
    let channel = ChannelId(1);

    session.add_channel(channel, AxisSlot::Primary);
    session.add_channel(channel, AxisSlot::Secondary);

    assert_eq!(session.channel_count(), 1);
    assert!(session.has_channel(channel));
    assert_eq!(session.channel_slot(channel), Some(AxisSlot::Secondary));
}

#[test]
fn remove_channel_drops_membership_and_slot_together() {
    let mut session = PlotSession::new("scope");
    let channel = ChannelId(3);
    session.add_channel(channel, AxisSlot::Secondary);

    assert!(session.remove_channel(channel));
    assert!(!session.has_channel(channel));
    assert!(session.channel_slot(channel).is_none());
    assert!(!session.remove_channel(channel));
}

#[test]
fn external_axis_assignment_overwrites_and_clears() {
    let mut session = PlotSession::new("scope");
    session.set_external_axis(ChannelId(5), false);
    session.set_external_axis(ChannelId(9), true);

    assert_eq!(
        session.axis_mode(),
        AxisMode::ExternalAxis {
            channel: ChannelId(9),
            realtime: true
        }
    );

    session.clear_external_axis();
    assert_eq!(session.axis_mode(), AxisMode::TimeWindow);
}

#[test]
fn set_axis_realtime_only_touches_external_mode() {
    let mut session = PlotSession::new("scope");
    session.set_axis_realtime(true);
    assert_eq!(session.axis_mode(), AxisMode::TimeWindow);

    session.set_external_axis(ChannelId(2), true);
    session.set_axis_realtime(false);
    assert_eq!(
        session.axis_mode(),
        AxisMode::ExternalAxis {
            channel: ChannelId(2),
            realtime: false
        }
    );
}

#[test]
fn compute_view_time_window_with_autoscale() {
    let channel = ChannelId(0);
    let registry = registry_with_ramp(channel, 20);

    let mut session = PlotSession::new("scope");
    session.add_channel(channel, AxisSlot::Primary);
    session.set_time_frame(5.0).expect("valid time frame");

    let (window, bounds) = session
        .compute_view(&registry, TickContext::new(19.0))
        .expect("compute");

    assert_relative_eq!(window.x_min, 14.0);
    assert_relative_eq!(window.x_max, 19.0);
    // visible x in [14, 19], y doubles x
    assert_eq!(bounds[0].as_range(), Some((28.0, 38.0)));
    assert!(!bounds[1].populated);
}

#[test]
fn compute_view_skips_channels_without_data() {
    let registry = ChannelRegistry::new();
    let mut session = PlotSession::new("scope");
    session.add_channel(ChannelId(42), AxisSlot::Primary);

    let (window, bounds) = session
        .compute_view(&registry, TickContext::new(10.0))
        .expect("missing channels are skipped, not fatal");

    assert_relative_eq!(window.x_max, 10.0);
    assert!(!bounds[0].populated);
}

#[test]
fn compute_view_without_autoscale_leaves_bounds_unpopulated() {
    let channel = ChannelId(0);
    let registry = registry_with_ramp(channel, 10);

    let mut session = PlotSession::new("scope");
    session.add_channel(channel, AxisSlot::Primary);
    session.set_autoscale(false);

    let (_, bounds) = session
        .compute_view(&registry, TickContext::new(9.0))
        .expect("compute");
    assert!(!bounds[0].populated);
    assert!(!bounds[1].populated);
}

#[test]
fn compute_view_external_axis_realtime() {
    let data = ChannelId(0);
    let axis = ChannelId(1);
    let registry = ChannelRegistry::new();
    registry.register(data, 16).expect("register data");
    registry.register(axis, 16).expect("register axis");

    // lockstep append: axis values are the shared x coordinates
    for i in 0..5 {
        registry
            .append(axis, Sample::new(i as f64, (i as f64) * 10.0))
            .expect("axis sample");
        registry
            .append(data, Sample::new(i as f64, 100.0 - i as f64))
            .expect("data sample");
    }

    let mut session = PlotSession::new("xy");
    session.add_channel(data, AxisSlot::Primary);
    session.set_external_axis(axis, true);
    session.set_time_frame(15.0).expect("valid time frame");

    let (window, bounds) = session
        .compute_view(&registry, TickContext::new(999.0))
        .expect("compute");

    // axis values are 0,10,20,30,40; realtime anchors at 40
    assert_relative_eq!(window.x_max, 40.0);
    assert_relative_eq!(window.x_min, 25.0);
    assert_eq!(
        window.mask,
        Some(vec![false, false, false, true, true])
    );
    // visible samples are indices 3 and 4 with y = 97, 96
    assert_eq!(bounds[0].as_range(), Some((96.0, 97.0)));
}

#[test]
fn wheel_zoom_scales_time_frame() {
    let mut session = PlotSession::new("scope");
    session.set_time_frame(10.0).expect("valid time frame");

    session.apply_wheel(10.0);
    assert_relative_eq!(session.time_frame(), 11.0);

    session.apply_wheel(-10.0);
    assert_relative_eq!(session.time_frame(), 9.9);
}

#[test]
fn wheel_pans_manual_external_axis_window() {
    let axis = ChannelId(7);
    let registry = ChannelRegistry::new();
    registry.register(axis, 8).expect("register");
    registry
        .append_many(
            axis,
            &[Sample::new(0.0, 1.2), Sample::new(1.0, 2.8)],
        )
        .expect("append");

    let mut session = PlotSession::new("xy");
    session.set_external_axis(axis, false);
    session.set_autoscale(false);

    // retained window starts at (0, 1); wheel shifts it by delta / 20
    session.apply_wheel(20.0);
    let (window, _) = session
        .compute_view(&registry, TickContext::new(0.0))
        .expect("compute");

    assert_relative_eq!(window.x_min, 1.0);
    assert_relative_eq!(window.x_max, 2.0);
    assert_eq!(window.mask, Some(vec![true, false]));
}

#[test]
fn invalid_time_frame_is_rejected() {
    let mut session = PlotSession::new("scope");
    assert!(session.set_time_frame(0.0).is_err());
    assert!(session.set_time_frame(-1.0).is_err());
    assert!(session.set_time_frame(f64::NAN).is_err());
    assert!(session.set_time_frame(2.5).is_ok());
}

#[test]
fn pause_freezes_view_while_live_buffer_keeps_growing() {
    let channel = ChannelId(0);
    let registry = registry_with_ramp(channel, 3);

    let mut session = PlotSession::new("scope");
    session.add_channel(channel, AxisSlot::Primary);
    session.pause(&registry);
    assert!(session.is_paused());

    for i in 3..6 {
        registry
            .append(channel, Sample::new(i as f64, (i as f64) * 2.0))
            .expect("live append");
    }

    let snapshot = session.snapshot().expect("paused session has snapshot");
    assert_eq!(
        snapshot.channel(channel).expect("captured channel").len(),
        3
    );

    // paused view only sees the first three samples
    let (_, bounds) = session
        .compute_view(&registry, TickContext::new(100.0))
        .expect("compute");
    assert!(!bounds[0].populated);

    let (_, bounds) = session
        .compute_view(&registry, TickContext::new(2.0))
        .expect("compute");
    assert_eq!(bounds[0].as_range(), Some((0.0, 4.0)));
}

#[test]
fn resume_returns_to_live_buffers() {
    let channel = ChannelId(0);
    let registry = registry_with_ramp(channel, 3);

    let mut session = PlotSession::new("scope");
    session.add_channel(channel, AxisSlot::Primary);
    session.set_time_frame(100.0).expect("valid time frame");
    session.pause(&registry);

    for i in 3..6 {
        registry
            .append(channel, Sample::new(i as f64, (i as f64) * 2.0))
            .expect("live append");
    }

    session.resume();
    assert!(!session.is_paused());
    assert!(session.snapshot().is_none());

    let (_, bounds) = session
        .compute_view(&registry, TickContext::new(5.0))
        .expect("compute");
    assert_eq!(bounds[0].as_range(), Some((0.0, 10.0)));
}

#[test]
fn refresh_snapshot_recaptures_while_paused() {
    let channel = ChannelId(0);
    let registry = registry_with_ramp(channel, 3);

    let mut session = PlotSession::new("scope");
    session.add_channel(channel, AxisSlot::Primary);
    session.pause(&registry);

    for i in 3..6 {
        registry
            .append(channel, Sample::new(i as f64, (i as f64) * 2.0))
            .expect("live append");
    }
    session.refresh_snapshot(&registry);

    let snapshot = session.snapshot().expect("still paused");
    assert_eq!(
        snapshot.channel(channel).expect("captured channel").len(),
        6
    );
}

#[test]
fn refresh_snapshot_on_live_session_is_a_no_op() {
    let channel = ChannelId(0);
    let registry = registry_with_ramp(channel, 3);

    let mut session = PlotSession::new("scope");
    session.add_channel(channel, AxisSlot::Primary);
    session.refresh_snapshot(&registry);
    assert!(!session.is_paused());
}

#[test]
fn paused_external_axis_uses_frozen_axis_buffer() {
    let data = ChannelId(0);
    let axis = ChannelId(1);
    let registry = ChannelRegistry::new();
    registry.register(data, 16).expect("register data");
    registry.register(axis, 16).expect("register axis");
    for i in 0..3 {
        registry
            .append(axis, Sample::new(i as f64, i as f64))
            .expect("axis sample");
        registry
            .append(data, Sample::new(i as f64, i as f64 + 0.5))
            .expect("data sample");
    }

    let mut session = PlotSession::new("xy");
    session.add_channel(data, AxisSlot::Primary);
    session.set_external_axis(axis, true);
    session.set_time_frame(10.0).expect("valid time frame");
    session.pause(&registry);

    // live appends after the pause must not move the frozen window
    registry
        .append(axis, Sample::new(3.0, 50.0))
        .expect("axis sample");
    registry
        .append(data, Sample::new(3.0, 3.5))
        .expect("data sample");

    let (window, _) = session
        .compute_view(&registry, TickContext::new(0.0))
        .expect("compute");
    assert_relative_eq!(window.x_max, 2.0);
}
