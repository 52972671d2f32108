use crate::core::{AxisBounds, AxisSlot, ChannelId, ViewWindow};
use crate::error::{PlotError, PlotResult};

/// One channel's sample columns plus its y-axis slot assignment.
///
/// `xs` and `ys` are parallel columns in append order.
#[derive(Debug, Clone, Copy)]
pub struct SlottedSeries<'a> {
    pub channel: ChannelId,
    pub xs: &'a [f64],
    pub ys: &'a [f64],
    pub slot: AxisSlot,
}

/// Computes per-slot y bounds over the samples visible in `window`.
///
/// Visibility is decided by the window's mask when one is present (external
/// x axis), otherwise by each sample's own x value against the inclusive
/// range. Bounds are seeded by the first visible sample, so a slot that never
/// sees one stays unpopulated and must not be applied by the caller.
///
/// When a mask is present every channel must hold exactly as many samples as
/// the external axis buffer; a mismatch is an [`PlotError::AxisMisaligned`]
/// error rather than a silently mis-indexed plot. An empty mask means nothing
/// is visible and contributes no bounds.
pub fn axis_bounds(
    series: &[SlottedSeries<'_>],
    window: &ViewWindow,
) -> PlotResult<[AxisBounds; 2]> {
    let mut bounds = [AxisBounds::default(); AxisSlot::COUNT];

    for entry in series {
        match &window.mask {
            Some(mask) if mask.is_empty() => {}
            Some(mask) => {
                if mask.len() != entry.ys.len() {
                    return Err(PlotError::AxisMisaligned {
                        channel: entry.channel,
                        channel_len: entry.ys.len(),
                        axis_len: mask.len(),
                    });
                }
                for (visible, y) in mask.iter().zip(entry.ys) {
                    if *visible {
                        bounds[entry.slot.index()].include(*y);
                    }
                }
            }
            None => {
                for (x, y) in entry.xs.iter().zip(entry.ys) {
                    if window.contains(*x) {
                        bounds[entry.slot.index()].include(*y);
                    }
                }
            }
        }
    }

    Ok(bounds)
}
