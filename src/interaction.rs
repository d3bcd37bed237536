//! Pointer and slider interaction with the current color.
//!
//! [`PickerInteraction`] owns the single HSV color of a picker session and
//! maps input onto it:
//! - pointer drags over the square surface set saturation (x) and value (y)
//! - the hue and opacity sliders set hue and opacity
//!
//! Operations come in two kinds. Notifying operations return `true` when the
//! color changed and the change must be handed to the emission scheduler.
//! Raw setters ([`set_saturation`](PickerInteraction::set_saturation),
//! [`set_value`](PickerInteraction::set_value)) only write state.

use colorpick_model::{Hsv, Rgb};

use crate::constants::{DEFAULT_SIZE, OPACITY_EPSILON, UNIT_PIXEL};

/// Interaction state of one picker.
#[derive(Debug, Clone)]
pub struct PickerInteraction {
    /// The current color, mutated in place
    color: Hsv,
    /// Pointer button is held over the saturation/value surface
    dragging: bool,
    /// Surface size in logical units
    size: f64,
    /// RGB of `color`, refreshed on every notifying change
    selected_rgb: Rgb,
    /// Full saturation/value color at the current hue
    base_color: Rgb,
}

impl Default for PickerInteraction {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl PickerInteraction {
    /// Create interaction state with the default color.
    pub fn new(size: f64) -> Self {
        Self::with_color(size, Hsv::default())
    }

    /// Create interaction state starting from `color`.
    pub fn with_color(size: f64, color: Hsv) -> Self {
        Self {
            color,
            dragging: false,
            size,
            selected_rgb: color.to_rgb(),
            base_color: color.base_hue().to_rgb(),
        }
    }

    /// The current color.
    pub fn color(&self) -> Hsv {
        self.color
    }

    /// RGB of the current color as of the last notifying change.
    pub fn selected_rgb(&self) -> Rgb {
        self.selected_rgb
    }

    /// Hue preview swatch: the current hue at full saturation and value.
    pub fn base_color(&self) -> Rgb {
        self.base_color
    }

    /// Surface size in logical units.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Change the surface size. Takes effect on the next pointer move.
    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    /// Surface edge length in pixels.
    pub fn surface_pixels(&self) -> f64 {
        self.size * UNIT_PIXEL
    }

    /// Whether a drag over the surface is active.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer button went down over the surface.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
        log::trace!("Picker: drag started");
    }

    /// Pointer button went up.
    pub fn end_drag(&mut self) {
        if self.dragging {
            log::trace!("Picker: drag ended");
        }
        self.dragging = false;
    }

    /// Pointer moved to `(offset_x, offset_y)` pixels from the surface origin.
    ///
    /// Ignored unless a drag is active. Offsets are divided by the surface
    /// size without clamping, so positions outside the surface give
    /// saturation or value outside `[0, 1]`. The y axis is inverted: the top
    /// edge is full value.
    #[must_use = "a change must be forwarded to the emission scheduler"]
    pub fn pointer_move(&mut self, offset_x: f64, offset_y: f64) -> bool {
        if !self.dragging {
            return false;
        }
        let pixels = self.surface_pixels();
        self.set_saturation(offset_x / pixels);
        self.set_value(1.0 - offset_y / pixels);
        log::trace!(
            "Picker: pointer at ({}, {}) -> s={:.3} v={:.3}",
            offset_x,
            offset_y,
            self.color.saturation,
            self.color.value
        );
        self.color_changed();
        true
    }

    /// Pointer button went down at a surface position: start a drag and
    /// jump there.
    #[must_use = "a change must be forwarded to the emission scheduler"]
    pub fn press(&mut self, offset_x: f64, offset_y: f64) -> bool {
        self.begin_drag();
        self.pointer_move(offset_x, offset_y)
    }

    /// Set the hue. Setting the current hue again is a no-op.
    #[must_use = "a change must be forwarded to the emission scheduler"]
    pub fn set_hue(&mut self, hue: i32) -> bool {
        if hue == self.color.hue {
            return false;
        }
        self.color.hue = hue;
        self.color_changed();
        true
    }

    /// Set the opacity. Changes below `OPACITY_EPSILON` are ignored.
    #[must_use = "a change must be forwarded to the emission scheduler"]
    pub fn set_opacity(&mut self, opacity: f64) -> bool {
        if (opacity - self.color.opacity).abs() < OPACITY_EPSILON {
            return false;
        }
        self.color.opacity = opacity;
        self.color_changed();
        true
    }

    /// Write saturation without notifying.
    pub fn set_saturation(&mut self, saturation: f64) {
        self.color.saturation = saturation;
    }

    /// Write value without notifying.
    pub fn set_value(&mut self, value: f64) {
        self.color.value = value;
    }

    /// Replace the whole color, e.g. from an externally supplied string.
    ///
    /// Refreshes the derived colors but is not a notifying change.
    pub fn load(&mut self, color: Hsv) {
        self.color = color;
        self.color_changed();
    }

    fn color_changed(&mut self) {
        self.selected_rgb = self.color.to_rgb();
        self.base_color = self.color.base_hue().to_rgb();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_initial_state() {
        let picker = PickerInteraction::default();
        assert_eq!(picker.color(), Hsv::default());
        assert!(!picker.is_dragging());
        assert_close(picker.surface_pixels(), 220.0);
        assert_eq!(picker.base_color(), Rgb::new(255, 0, 0));
        assert_eq!(picker.selected_rgb(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut picker = PickerInteraction::with_color(22.0, Hsv::new(10, 0.2, 0.3));
        assert!(!picker.pointer_move(100.0, 100.0));
        assert_eq!(picker.color(), Hsv::new(10, 0.2, 0.3));
    }

    #[test]
    fn test_drag_maps_offsets_to_saturation_and_value() {
        let mut picker = PickerInteraction::new(22.0);
        picker.begin_drag();

        assert!(picker.pointer_move(110.0, 55.0));
        assert_close(picker.color().saturation, 0.5);
        assert_close(picker.color().value, 0.75);

        // Top-right corner: full saturation, full value
        assert!(picker.pointer_move(220.0, 0.0));
        assert_close(picker.color().saturation, 1.0);
        assert_close(picker.color().value, 1.0);
        assert_eq!(picker.selected_rgb(), Rgb::new(255, 0, 0));

        picker.end_drag();
        assert!(!picker.pointer_move(0.0, 0.0));
        assert_close(picker.color().saturation, 1.0);
    }

    #[test]
    fn test_drag_outside_surface_is_not_clamped() {
        let mut picker = PickerInteraction::new(10.0);
        assert!(picker.press(-10.0, 200.0));
        assert_close(picker.color().saturation, -0.1);
        assert_close(picker.color().value, -1.0);
    }

    #[test]
    fn test_size_scales_surface() {
        let mut picker = PickerInteraction::new(22.0);
        picker.set_size(5.0);
        assert_close(picker.size(), 5.0);
        assert!(picker.press(25.0, 25.0));
        assert_close(picker.color().saturation, 0.5);
        assert_close(picker.color().value, 0.5);
    }

    #[test]
    fn test_same_hue_is_noop() {
        let mut picker = PickerInteraction::default();
        assert!(picker.set_hue(120));
        assert!(!picker.set_hue(120));
        assert_eq!(picker.color().hue, 120);
        assert_eq!(picker.base_color(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_small_opacity_change_is_ignored() {
        let mut picker = PickerInteraction::default();
        assert!(!picker.set_opacity(0.995));
        assert_eq!(picker.color().opacity, 1.0);

        assert!(picker.set_opacity(0.5));
        assert_eq!(picker.color().opacity, 0.5);
        assert_eq!(picker.selected_rgb().opacity, 0.5);
    }

    #[test]
    fn test_raw_setters_do_not_refresh_derived_colors() {
        let mut picker = PickerInteraction::with_color(22.0, Hsv::new(0, 1.0, 1.0));
        picker.set_value(0.0);
        picker.set_saturation(0.0);
        assert_eq!(picker.color(), Hsv::new(0, 0.0, 0.0));
        assert_eq!(picker.selected_rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_load_replaces_color() {
        let mut picker = PickerInteraction::default();
        picker.load(Hsv::new(240, 1.0, 1.0));
        assert_eq!(picker.selected_rgb(), Rgb::new(0, 0, 255));
        assert_eq!(picker.base_color(), Rgb::new(0, 0, 255));
    }
}
