use tracing::{debug, trace, warn};

use crate::axis::{AxisLayoutEngine, AxisState};
use crate::core::{AxisScale, MarginBox, PlotGeometry, TextMeasurer};

/// Converged (or capped) result of one margin negotiation.
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationOutcome {
    pub geometry: PlotGeometry,
    pub x_state: AxisState,
    pub y_state: AxisState,
    /// Passes run before the margin stopped changing or the cap was reached.
    pub passes: usize,
    /// False when the pass cap was hit with the margin still growing.
    pub converged: bool,
}

/// Fixed-point iteration between axis thickness and plot size.
///
/// Each pass lays out the y axis, widens the inner margin to cover it, lays
/// out the x axis against the narrowed plot and widens again. Margins only
/// grow, so the loop stops at the first pass that leaves them unchanged or at
/// `max_passes`. Both axes are then laid out once more against the final
/// geometry with gridlines sized to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginNegotiator {
    max_passes: usize,
}

impl MarginNegotiator {
    #[must_use]
    pub fn new(max_passes: usize) -> Self {
        Self {
            max_passes: max_passes.max(1),
        }
    }

    #[must_use]
    pub fn max_passes(self) -> usize {
        self.max_passes
    }

    /// `scales` builds the (x, y) scales for a tentative geometry.
    pub fn negotiate<F>(
        self,
        available_width: f64,
        available_height: f64,
        x_axis: &mut AxisLayoutEngine,
        y_axis: &mut AxisLayoutEngine,
        measurer: &dyn TextMeasurer,
        scales: F,
    ) -> NegotiationOutcome
    where
        F: Fn(&PlotGeometry) -> (AxisScale, AxisScale),
    {
        let mut margin = MarginBox::zero();
        let mut geometry = PlotGeometry::new(available_width, available_height, margin);
        let mut passes = 0;
        let mut converged = false;

        while passes < self.max_passes {
            passes += 1;
            let previous = margin;

            let (_, y_scale) = scales(&geometry);
            y_axis.resize_tick_lines(geometry.inner_width);
            let y_state = y_axis.layout(&y_scale, measurer);
            margin = margin.max(y_state.margin);
            geometry = geometry.with_inner_margin(margin);

            let (x_scale, _) = scales(&geometry);
            x_axis.resize_tick_lines(geometry.inner_height);
            let x_state = x_axis.layout(&x_scale, measurer);
            margin = margin.max(x_state.margin);
            geometry = geometry.with_inner_margin(margin);

            trace!(
                pass = passes,
                top = margin.top,
                right = margin.right,
                bottom = margin.bottom,
                left = margin.left,
                "margin negotiation pass"
            );
            if margin == previous {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                passes,
                max_passes = self.max_passes,
                "margin negotiation hit its pass cap before converging"
            );
        }

        let (x_scale, y_scale) = scales(&geometry);
        y_axis.resize_tick_lines(geometry.inner_width);
        x_axis.resize_tick_lines(geometry.inner_height);
        let y_state = y_axis.layout(&y_scale, measurer);
        let x_state = x_axis.layout(&x_scale, measurer);

        debug!(
            passes,
            converged,
            inner_width = geometry.inner_width,
            inner_height = geometry.inner_height,
            "margin negotiation finished"
        );
        NegotiationOutcome {
            geometry,
            x_state,
            y_state,
            passes,
            converged,
        }
    }
}

impl Default for MarginNegotiator {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_MAX_NEGOTIATION_PASSES)
    }
}
