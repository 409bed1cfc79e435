//! Maps encoder progress bars onto the UI progress fraction.

use super::encoder::ProgressHook;

/// Per-run adapter between the encoder's bar notifications and a `[0, 1]`
/// fraction.
///
/// Only the most recently announced total is remembered. The encoder reports
/// its bars one after another, so a new announcement simply restarts the
/// fraction for the next bar.
pub struct ProgressAdapter<F: FnMut(f32)> {
    /// Last announced bar size; 1 until the encoder announces one
    total: f64,
    report: F,
}

impl<F: FnMut(f32)> ProgressAdapter<F> {
    /// Create an adapter that hands every computed fraction to `report`.
    pub fn new(report: F) -> Self {
        Self { total: 1.0, report }
    }

    /// Handle one progress notification and return the fraction reported.
    pub fn on_progress(&mut self, current: f64, total: Option<f64>) -> f32 {
        if let Some(total) = total.filter(|t| *t != 0.0) {
            self.total = total;
        }
        let fraction = fraction(current, self.total);
        (self.report)(fraction);
        fraction
    }

    /// The total currently used as the denominator.
    pub fn total(&self) -> f64 {
        self.total
    }
}

impl<F: FnMut(f32)> ProgressHook for ProgressAdapter<F> {
    fn bars_callback(&mut self, bar: &str, attr: &str, value: f64, total: Option<f64>) {
        log::trace!("progress {bar}.{attr} = {value} (total {total:?})");
        self.on_progress(value, total);
    }
}

/// `clamp(max(value, 0) / total, 0, 1)`; NaN inputs map to 0.
pub fn fraction(value: f64, total: f64) -> f32 {
    let value = value.max(0.0);
    let ratio = value / total;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(events: &[(f64, Option<f64>)]) -> Vec<f32> {
        let mut seen = Vec::new();
        {
            let mut adapter = ProgressAdapter::new(|f| seen.push(f));
            for (value, total) in events {
                adapter.on_progress(*value, *total);
            }
        }
        seen
    }

    #[test]
    fn test_default_total_is_one() {
        let mut adapter = ProgressAdapter::new(|_| {});
        assert_eq!(adapter.total(), 1.0);
        assert_eq!(adapter.on_progress(0.5, None), 0.5);
    }

    #[test]
    fn test_remembers_announced_total() {
        assert_eq!(
            collect(&[(0.0, Some(200.0)), (50.0, None), (100.0, None), (200.0, None)]),
            vec![0.0, 0.25, 0.5, 1.0]
        );
    }

    #[test]
    fn test_clamps_negative_and_overshoot() {
        assert_eq!(collect(&[(-5.0, Some(10.0)), (25.0, None)]), vec![0.0, 1.0]);
    }

    #[test]
    fn test_zero_total_keeps_previous() {
        let mut adapter = ProgressAdapter::new(|_| {});
        adapter.on_progress(0.0, Some(8.0));
        assert_eq!(adapter.on_progress(4.0, Some(0.0)), 0.5);
        assert_eq!(adapter.total(), 8.0);
    }

    #[test]
    fn test_later_bar_replaces_total() {
        assert_eq!(
            collect(&[(10.0, Some(10.0)), (0.0, Some(4.0)), (1.0, None)]),
            vec![1.0, 0.0, 0.25]
        );
    }

    #[test]
    fn test_fraction_always_in_unit_range() {
        let values = [-1e9, -1.0, 0.0, 0.3, 1.0, 7.5, 1e12, f64::NAN, f64::INFINITY];
        let totals = [-3.0, 0.5, 1.0, 7.0, 1e6, f64::INFINITY];
        for value in values {
            for total in totals {
                let f = fraction(value, total);
                assert!((0.0..=1.0).contains(&f), "fraction({value}, {total}) = {f}");
            }
        }
    }

    #[test]
    fn test_hook_forwards_to_adapter() {
        let mut last = None;
        {
            let mut adapter = ProgressAdapter::new(|f| last = Some(f));
            let hook: &mut dyn ProgressHook = &mut adapter;
            hook.bars_callback("frame_index", "total", 0.0, Some(40.0));
            hook.bars_callback("frame_index", "index", 10.0, None);
        }
        assert_eq!(last, Some(0.25));
    }
}
