//! The color picker component.
//!
//! [`ColorPicker`] ties the pieces together the way a host UI drives them:
//! input parameters (size, value string, output format) and pointer events go
//! in, and a debounced, formatted color string comes out through the
//! `on_value_changed` callback.

use std::sync::{Arc, Mutex};

use colorpick_model::{parse, ColorFormat, Hsv, Rgb};

use crate::callback::Publish;
use crate::config::PickerConfig;
use crate::error::PickerError;
use crate::interaction::PickerInteraction;
use crate::scheduler::{lock, EmissionScheduler};

/// State read by the timer thread at publish time.
#[derive(Debug)]
struct PickerShared {
    interaction: PickerInteraction,
    format: ColorFormat,
}

impl PickerShared {
    fn formatted(&self) -> String {
        self.interaction.color().format(self.format)
    }
}

/// A color picker session.
///
/// Every notifying change restarts the emission timer. When the quiet
/// period passes, the timer thread formats the color that is current at
/// that moment and hands it to `on_value_changed`.
///
/// Dropping the picker disposes it.
#[derive(Debug)]
pub struct ColorPicker {
    shared: Arc<Mutex<PickerShared>>,
    scheduler: EmissionScheduler,
    /// Last externally supplied value, to skip re-parsing unchanged input
    last_input: Option<String>,
}

impl ColorPicker {
    /// Create a picker from configuration.
    ///
    /// `on_value_changed` runs on the emission timer thread.
    pub fn new<F>(config: &PickerConfig, on_value_changed: F) -> Result<Self, PickerError>
    where
        F: FnMut(String) + Send + 'static,
    {
        config.validate()?;

        let shared = Arc::new(Mutex::new(PickerShared {
            interaction: PickerInteraction::new(config.size),
            format: config.output_format,
        }));

        let source = Arc::clone(&shared);
        let mut publish = Publish::new(on_value_changed);
        let scheduler = EmissionScheduler::spawn(config.quiet_period(), move || {
            let value = lock(&source).formatted();
            log::debug!("Publishing color {}", value);
            publish.call(value);
        })?;

        let mut picker = Self {
            shared,
            scheduler,
            last_input: None,
        };
        if let Some(initial) = &config.initial_value {
            picker.set_input_value(initial);
        }

        log::info!(
            "Color picker ready: size {} ({} px), output {}",
            config.size,
            picker.surface_pixels(),
            config.output_format
        );
        Ok(picker)
    }

    /// Apply an externally supplied color string.
    ///
    /// Only re-parses when `text` differs from the last value seen.
    /// Unrecognized strings load the fallback color. Returns whether the
    /// color was replaced; this is never published.
    pub fn set_input_value(&mut self, text: &str) -> bool {
        if self.last_input.as_deref() == Some(text) {
            return false;
        }
        self.last_input = Some(text.to_string());

        let color = parse(text);
        log::debug!("Input value {:?} loaded as {}", text, color);
        lock(&self.shared).interaction.load(color);
        true
    }

    /// Pointer button down at a surface position.
    pub fn press(&mut self, offset_x: f64, offset_y: f64) -> bool {
        self.update(|picker| picker.press(offset_x, offset_y))
    }

    /// Pointer button down without a position.
    pub fn begin_drag(&mut self) {
        lock(&self.shared).interaction.begin_drag();
    }

    /// Pointer moved over the surface. Ignored unless dragging.
    pub fn pointer_move(&mut self, offset_x: f64, offset_y: f64) -> bool {
        self.update(|picker| picker.pointer_move(offset_x, offset_y))
    }

    /// Pointer button up.
    pub fn release(&mut self) {
        lock(&self.shared).interaction.end_drag();
    }

    /// Hue slider moved.
    pub fn set_hue(&mut self, hue: i32) -> bool {
        self.update(|picker| picker.set_hue(hue))
    }

    /// Opacity slider moved.
    pub fn set_opacity(&mut self, opacity: f64) -> bool {
        self.update(|picker| picker.set_opacity(opacity))
    }

    /// Write saturation without scheduling a publish.
    pub fn set_saturation(&mut self, saturation: f64) {
        lock(&self.shared).interaction.set_saturation(saturation);
    }

    /// Write value without scheduling a publish.
    pub fn set_value(&mut self, value: f64) {
        lock(&self.shared).interaction.set_value(value);
    }

    /// Change the surface size in logical units.
    pub fn set_size(&mut self, size: f64) {
        lock(&self.shared).interaction.set_size(size);
    }

    /// Change the encoding of future publishes.
    pub fn set_output_format(&mut self, format: ColorFormat) {
        lock(&self.shared).format = format;
    }

    /// The current color.
    pub fn current(&self) -> Hsv {
        lock(&self.shared).interaction.color()
    }

    /// RGB of the current color as of the last notifying change.
    pub fn selected_rgb(&self) -> Rgb {
        lock(&self.shared).interaction.selected_rgb()
    }

    /// Hue preview swatch.
    pub fn base_color(&self) -> Rgb {
        lock(&self.shared).interaction.base_color()
    }

    /// The current color in the output format.
    pub fn formatted(&self) -> String {
        lock(&self.shared).formatted()
    }

    /// Encoding of published values.
    pub fn output_format(&self) -> ColorFormat {
        lock(&self.shared).format
    }

    /// Whether a surface drag is active.
    pub fn is_dragging(&self) -> bool {
        lock(&self.shared).interaction.is_dragging()
    }

    /// Surface edge length in pixels.
    pub fn surface_pixels(&self) -> f64 {
        lock(&self.shared).interaction.surface_pixels()
    }

    /// Stop publishing. No callback runs after this returns.
    pub fn dispose(&mut self) {
        self.scheduler.dispose();
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.scheduler.is_disposed()
    }

    /// Run a notifying operation and restart the timer if it changed the
    /// color. The lock is released before the restart.
    fn update(&mut self, op: impl FnOnce(&mut PickerInteraction) -> bool) -> bool {
        let changed = op(&mut lock(&self.shared).interaction);
        if changed {
            self.scheduler.restart();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{self, Receiver};
    use std::thread;
    use std::time::Duration;

    const SETTLE: Duration = Duration::from_millis(400);

    fn picker_with(config: PickerConfig) -> (ColorPicker, Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        let picker = ColorPicker::new(&config, move |value| {
            let _ = tx.send(value);
        })
        .unwrap();
        (picker, rx)
    }

    fn test_config() -> PickerConfig {
        PickerConfig {
            quiet_period_ms: 100,
            ..PickerConfig::default()
        }
    }

    fn published(rx: &Receiver<String>) -> Vec<String> {
        thread::sleep(SETTLE);
        rx.try_iter().collect()
    }

    #[test]
    fn test_drag_burst_publishes_final_color_once() {
        let (mut picker, rx) = picker_with(test_config());
        assert!(picker.set_hue(240));
        assert!(picker.press(0.0, 220.0));
        for step in 1..=10u32 {
            let offset = f64::from(step) * 22.0;
            assert!(picker.pointer_move(offset, 220.0 - offset));
        }
        picker.release();

        assert_eq!(published(&rx), vec!["#0000FF".to_string()]);
    }

    #[test]
    fn test_same_hue_twice_publishes_once() {
        let (mut picker, rx) = picker_with(test_config());
        assert!(picker.set_hue(60));
        thread::sleep(SETTLE);
        assert!(!picker.set_hue(60));

        assert_eq!(rx.try_iter().count(), 1);
        assert!(published(&rx).is_empty());
    }

    #[test]
    fn test_move_without_drag_publishes_nothing() {
        let (mut picker, rx) = picker_with(test_config());
        let before = picker.current();
        assert!(!picker.pointer_move(50.0, 50.0));
        assert_eq!(picker.current(), before);
        assert!(published(&rx).is_empty());
    }

    #[test]
    fn test_publish_reads_state_at_fire_time() {
        let config = PickerConfig {
            initial_value: Some("#FF0000".to_string()),
            ..test_config()
        };
        let (mut picker, rx) = picker_with(config);
        assert!(picker.set_hue(120));
        // Raw write after the restart still shows up in the publish
        picker.set_value(0.5);

        assert_eq!(published(&rx), vec!["#007F00".to_string()]);
    }

    #[test]
    fn test_rgb_output_format() {
        let config = PickerConfig {
            output_format: ColorFormat::Rgb,
            initial_value: Some("rgba(0, 0, 255, 0.5)".to_string()),
            ..test_config()
        };
        let (mut picker, rx) = picker_with(config);
        assert_eq!(picker.formatted(), "rgba(0, 0, 255, 0.5)");
        assert!(picker.set_opacity(0.25));

        assert_eq!(published(&rx), vec!["rgba(0, 0, 255, 0.25)".to_string()]);
    }

    #[test]
    fn test_output_format_can_change() {
        let (mut picker, rx) = picker_with(test_config());
        picker.set_output_format(ColorFormat::Rgb);
        assert_eq!(picker.output_format(), ColorFormat::Rgb);
        // Already hue 0: nothing to publish
        assert!(!picker.set_hue(0));
        assert!(published(&rx).is_empty());

        assert!(picker.press(220.0, 0.0));
        assert_eq!(published(&rx), vec!["rgba(255, 0, 0, 1)".to_string()]);
    }

    #[test]
    fn test_input_value_is_loaded_once_and_not_published() {
        let (mut picker, rx) = picker_with(test_config());
        assert!(picker.set_input_value("#00FF00"));
        assert!(!picker.set_input_value("#00FF00"));
        assert_eq!(picker.current().hue, 120);
        assert_eq!(picker.selected_rgb(), Rgb::new(0, 255, 0));
        assert_eq!(picker.base_color(), Rgb::new(0, 255, 0));

        assert!(picker.set_input_value("garbage"));
        assert_eq!(picker.current(), colorpick_model::FALLBACK_COLOR);
        assert!(published(&rx).is_empty());
    }

    #[test]
    fn test_dispose_mid_quiet_period_prevents_publish() {
        let (mut picker, rx) = picker_with(test_config());
        assert!(picker.set_hue(200));
        picker.dispose();
        assert!(picker.is_disposed());

        assert!(picker.set_hue(201));
        assert!(published(&rx).is_empty());
    }

    #[test]
    fn test_size_and_drag_queries() {
        let (mut picker, _rx) = picker_with(test_config());
        assert!((picker.surface_pixels() - 220.0).abs() < 1e-9);
        picker.set_size(10.0);
        assert!((picker.surface_pixels() - 100.0).abs() < 1e-9);

        picker.begin_drag();
        assert!(picker.is_dragging());
        picker.set_saturation(0.3);
        assert!((picker.current().saturation - 0.3).abs() < 1e-9);
        picker.release();
        assert!(!picker.is_dragging());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PickerConfig {
            size: -1.0,
            ..PickerConfig::default()
        };
        assert!(matches!(
            ColorPicker::new(&config, |_| {}),
            Err(PickerError::Config(_))
        ));
    }
}
