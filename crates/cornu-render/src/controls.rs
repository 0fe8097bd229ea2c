//! Keyboard, wheel and slider inputs mapped onto scene changes.
//!
//! Every control either produces a replacement [`SceneConfig`] that needs a
//! redraw, or asks the viewer to start or stop the animation. None of them
//! re-tessellates the surface.

use cornu_math::DVec3;

use crate::scene::SceneConfig;

/// Distance moved per translation key press.
pub const TRANSLATE_STEP: f64 = 0.1;
pub const SHININESS_RANGE: (i32, i32) = (-10, 10);
pub const ZOOM_RANGE: (f64, f64) = (0.0, 2.0);
/// Wheel delta units per zoom notch.
const WHEEL_NOTCH: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Plus,
    Minus,
}

impl Key {
    /// Map a key name (`"ArrowLeft"`, `"a"`, `"+"`, ...) to a control key.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "+" => Some(Key::Plus),
            "-" => Some(Key::Minus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Key(Key),
    /// Raw wheel delta; positive zooms in.
    Wheel(f64),
    AmbientColor([f32; 3]),
    DiffuseColor([f32; 3]),
    SpecularColor([f32; 3]),
    Shininess(i32),
    LightIntensity(f32),
    TranslateX(f64),
    TranslateY(f64),
    TranslateZ(f64),
    Zoom(f64),
    ToggleAnimation,
    TogglePath,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Input rejected or not bound; nothing to do.
    Ignored,
    /// Swap in the new configuration and redraw.
    Redraw(SceneConfig),
    ToggleAnimation,
}

/// Apply one control to `config`.
pub fn apply(config: &SceneConfig, control: Control) -> Effect {
    let mut next = config.clone();
    match control {
        Control::Key(key) => apply_key(&mut next, key),
        Control::Wheel(delta) => match wheel_zoom(config.zoom, delta) {
            Some(zoom) => next.zoom = zoom,
            None => return Effect::Ignored,
        },
        Control::AmbientColor(c) => next.material.ambient = clamp_color(c),
        Control::DiffuseColor(c) => next.material.diffuse = clamp_color(c),
        Control::SpecularColor(c) => next.material.specular = clamp_color(c),
        Control::Shininess(s) => {
            next.material.shininess = s.clamp(SHININESS_RANGE.0, SHININESS_RANGE.1)
        }
        Control::LightIntensity(i) => {
            if !i.is_finite() {
                return Effect::Ignored;
            }
            next.light_intensity = i.max(0.0);
        }
        Control::TranslateX(x) => return set_translation(config, DVec3::new(x, config.translation.y, config.translation.z)),
        Control::TranslateY(y) => return set_translation(config, DVec3::new(config.translation.x, y, config.translation.z)),
        Control::TranslateZ(z) => return set_translation(config, DVec3::new(config.translation.x, config.translation.y, z)),
        Control::Zoom(z) => {
            if !z.is_finite() {
                return Effect::Ignored;
            }
            next.zoom = round_tenth(z.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1));
        }
        Control::ToggleAnimation => return Effect::ToggleAnimation,
        Control::TogglePath => next.show_path = !next.show_path,
    }
    Effect::Redraw(next)
}

fn apply_key(config: &mut SceneConfig, key: Key) {
    match key {
        Key::Left => config.translation.x -= TRANSLATE_STEP,
        Key::Right => config.translation.x += TRANSLATE_STEP,
        Key::Down => config.translation.y -= TRANSLATE_STEP,
        Key::Up => config.translation.y += TRANSLATE_STEP,
        // Keys step only while inside the range; an out-of-range value is left alone.
        Key::Plus => {
            if config.material.shininess < SHININESS_RANGE.1 {
                config.material.shininess += 1;
            }
        }
        Key::Minus => {
            if config.material.shininess > SHININESS_RANGE.0 {
                config.material.shininess -= 1;
            }
        }
    }
}

fn set_translation(config: &SceneConfig, translation: DVec3) -> Effect {
    if !translation.is_finite() {
        return Effect::Ignored;
    }
    Effect::Redraw(SceneConfig {
        translation,
        ..config.clone()
    })
}

/// New zoom after a wheel event, or `None` when it would leave [`ZOOM_RANGE`].
pub fn wheel_zoom(zoom: f64, delta: f64) -> Option<f64> {
    if !delta.is_finite() {
        return None;
    }
    let step = (delta / WHEEL_NOTCH).round() / 10.0;
    let next = round_tenth(zoom - step);
    (ZOOM_RANGE.0..=ZOOM_RANGE.1).contains(&next).then_some(next)
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn clamp_color(c: [f32; 3]) -> [f32; 3] {
    c.map(|x| if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) })
}
