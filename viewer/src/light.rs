//! Scene lights and flat Blinn-Phong shading.

use glam::DVec3;

use crate::consts::{
    AMBIENT_COLOR, AMBIENT_INTENSITY, FILL_LIGHT_INTENSITY, FILL_LIGHT_POSITION, KEY_LIGHT_INTENSITY,
    KEY_LIGHT_POSITION, SHADOW_EXTENT, SHADOW_FAR, SHADOW_MAP_SIZE, SHADOW_NEAR,
};
use crate::scene::Material;

#[cfg(test)]
#[path = "light_test.rs"]
mod light_test;

const WHITE: u32 = 0x00ff_ffff;

/// Shadow-map parameters of a shadow-casting light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    pub map_size: u32,
    pub near: f64,
    pub far: f64,
    /// Half-width of the orthographic shadow frustum.
    pub extent: f64,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self { map_size: SHADOW_MAP_SIZE, near: SHADOW_NEAR, far: SHADOW_FAR, extent: SHADOW_EXTENT }
    }
}

/// A light at `position` shining toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f64,
    pub position: DVec3,
    pub shadow: Option<ShadowSettings>,
}

impl DirectionalLight {
    /// Unit vector from a lit surface toward the light.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        self.position.normalize_or_zero()
    }
}

/// Ambient term plus a key and a fill light.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient_color: u32,
    pub ambient_intensity: f64,
    pub directional: Vec<DirectionalLight>,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: AMBIENT_COLOR,
            ambient_intensity: AMBIENT_INTENSITY,
            directional: vec![
                DirectionalLight {
                    color: WHITE,
                    intensity: KEY_LIGHT_INTENSITY,
                    position: DVec3::from_array(KEY_LIGHT_POSITION),
                    shadow: Some(ShadowSettings::default()),
                },
                DirectionalLight {
                    color: WHITE,
                    intensity: FILL_LIGHT_INTENSITY,
                    position: DVec3::from_array(FILL_LIGHT_POSITION),
                    shadow: None,
                },
            ],
        }
    }
}

impl Lighting {
    /// Colour of a flat face with unit `normal`, seen along unit `to_eye`.
    ///
    /// Double-sided materials light the side facing the eye.
    #[must_use]
    pub fn shade(&self, material: &Material, normal: DVec3, to_eye: DVec3) -> [u8; 3] {
        let n = if material.double_sided && normal.dot(to_eye) < 0.0 { -normal } else { normal };
        let base = rgb(material.color);
        let specular = rgb(material.specular);

        let mut out = rgb(self.ambient_color) * self.ambient_intensity * base;
        for light in &self.directional {
            let l = light.direction();
            let lambert = n.dot(l);
            if lambert <= 0.0 {
                continue;
            }
            let radiance = rgb(light.color) * light.intensity;
            out += radiance * base * lambert;
            let half = (l + to_eye).normalize_or_zero();
            out += radiance * specular * n.dot(half).max(0.0).powf(material.shininess);
        }
        to_bytes(out)
    }
}

/// `0xRRGGBB` as linear `[0, 1]` channels.
#[must_use]
pub fn rgb(hex: u32) -> DVec3 {
    DVec3::new(
        f64::from((hex >> 16) & 0xff) / 255.0,
        f64::from((hex >> 8) & 0xff) / 255.0,
        f64::from(hex & 0xff) / 255.0,
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_bytes(c: DVec3) -> [u8; 3] {
    let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(c.x), q(c.y), q(c.z)]
}

/// CSS `rgb()` string for a shaded colour.
#[must_use]
pub fn css_rgb([r, g, b]: [u8; 3]) -> String {
    format!("rgb({r},{g},{b})")
}

/// CSS hex string for `0xRRGGBB`.
#[must_use]
pub fn css_hex(hex: u32) -> String {
    format!("#{:06x}", hex & 0x00ff_ffff)
}
