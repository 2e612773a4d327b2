//! Scene content: captions, accent overlays, hotspots and the scroll hint.
//!
//! Everything here is positioned either by scroll progress (captions, hint)
//! or relative to the current layout bounds (accents, hotspots), so the
//! overlays track the fitted image whatever the window size.
//!
//! [`Scene::default`] is the built-in product page. A JSON file with the same
//! shape can replace it (`--scene`).

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::keyframes::{interpolate, Keyframes};
use super::layout::LayoutBounds;

/// Progress span of a caption's fade in / fade out
pub const CAPTION_FADE: f32 = 0.05;

/// Vertical travel of a caption while fading (logical px)
pub const CAPTION_SHIFT: f32 = 20.0;

/// Pointer distance that counts as hovering a hotspot (logical px)
pub const HOTSPOT_RADIUS: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Text block visible over a progress range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Fully visible over [start, end]
    pub range: [f32; 2],
    #[serde(default)]
    pub align: Align,
    /// Large display heading
    #[serde(default)]
    pub emphasis: bool,
    /// Label of the button that enters immersive mode
    #[serde(default)]
    pub action: Option<String>,
}

impl Caption {
    fn keys(&self) -> [f32; 4] {
        let [start, end] = self.range;
        [start - CAPTION_FADE, start, end, end + CAPTION_FADE]
    }

    /// 0 → 1 over [start-fade, start], 1 until end, 1 → 0 over [end, end+fade]
    pub fn opacity(&self, progress: f32) -> f32 {
        interpolate(progress, &self.keys(), &[0.0, 1.0, 1.0, 0.0])
    }

    /// Slides up from +20 to 0 while fading in, to -20 while fading out
    pub fn offset_y(&self, progress: f32) -> f32 {
        interpolate(progress, &self.keys(), &[CAPTION_SHIFT, 0.0, 0.0, -CAPTION_SHIFT])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentKind {
    /// Soft radial glow
    Glow,
    /// Warm gradient band
    Heat,
    /// Thin outlined chip with halo
    Outline,
}

/// Decorative overlay that pulses in over a progress range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accent {
    pub name: String,
    pub kind: AccentKind,
    /// [x, y, w, h] as fractions of the layout bounds
    pub rect: [f32; 4],
    /// RGBA
    pub color: [u8; 4],
    pub opacity: Keyframes,
    #[serde(default)]
    pub scale: Option<Keyframes>,
}

impl Accent {
    pub fn opacity(&self, progress: f32) -> f32 {
        self.opacity.at(progress).clamp(0.0, 1.0)
    }

    pub fn scale(&self, progress: f32) -> f32 {
        self.scale.as_ref().map_or(1.0, |k| k.at(progress))
    }

    /// Accent rectangle for the given bounds, scaled about its center
    pub fn rect_in(&self, bounds: &LayoutBounds, progress: f32) -> LayoutBounds {
        let [fx, fy, fw, fh] = self.rect;
        let base = bounds.sub_rect(fx, fy, fw, fh);
        let s = self.scale(progress);
        let (w, h) = (base.w * s, base.h * s);
        LayoutBounds {
            x: base.x + (base.w - w) / 2.0,
            y: base.y + (base.h - h) / 2.0,
            w,
            h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipSide {
    Left,
    #[default]
    Right,
}

/// Interactive marker shown in immersive mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub title: String,
    pub description: String,
    /// Center as fractions of the layout bounds
    pub anchor: [f32; 2],
    #[serde(default)]
    pub side: TooltipSide,
}

impl Hotspot {
    pub fn center(&self, bounds: &LayoutBounds) -> (f32, f32) {
        bounds.point_at(self.anchor[0], self.anchor[1])
    }
}

/// "Scroll to explore" prompt that fades once scrolling starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollHint {
    pub text: String,
    pub opacity: Keyframes,
}

/// Missing sections in a scene file are empty, not the built-in content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub captions: Vec<Caption>,
    #[serde(default)]
    pub accents: Vec<Accent>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub hint: Option<ScrollHint>,
}

impl Default for Scene {
    fn default() -> Self {
        let caption = |title: &str, body: &str, range: [f32; 2], align: Align| Caption {
            title: title.to_string(),
            body: body.to_string(),
            range,
            align,
            emphasis: false,
            action: None,
        };

        Self {
            captions: vec![
                Caption {
                    emphasis: true,
                    ..caption("Redmi Note 8 Pro.", "Performance, Refined.", [0.0, 0.2], Align::Center)
                },
                caption(
                    "64MP Quad Camera System.",
                    "Capture every detail with ultra-high resolution sensors.",
                    [0.25, 0.40],
                    Align::Left,
                ),
                caption(
                    "Power That Lasts.",
                    "4500mAh Battery + Liquid Cooling technology for sustained performance.",
                    [0.45, 0.65],
                    Align::Right,
                ),
                caption(
                    "Engineered From the Inside.",
                    "A symphony of precision components working in perfect harmony.",
                    [0.70, 0.85],
                    Align::Center,
                ),
                Caption {
                    emphasis: true,
                    action: Some("Experience Now".to_string()),
                    ..caption("Built to Be Experienced.", "", [0.90, 1.0], Align::Center)
                },
            ],
            accents: vec![
                Accent {
                    name: "camera".to_string(),
                    kind: AccentKind::Glow,
                    rect: [0.40, 0.15, 0.20, 0.10],
                    color: [6, 182, 212, 255],
                    opacity: Keyframes::new(&[0.25, 0.30, 0.35, 0.40], &[0.0, 0.4, 0.4, 0.0]),
                    scale: None,
                },
                Accent {
                    name: "battery".to_string(),
                    kind: AccentKind::Heat,
                    rect: [0.25, 0.40, 0.50, 0.35],
                    color: [245, 158, 11, 255],
                    opacity: Keyframes::new(&[0.45, 0.50, 0.60, 0.65], &[0.0, 0.2, 0.2, 0.0]),
                    scale: None,
                },
                Accent {
                    name: "chipset".to_string(),
                    kind: AccentKind::Outline,
                    rect: [0.425, 0.28, 0.15, 0.08],
                    color: [255, 255, 255, 255],
                    opacity: Keyframes::new(&[0.70, 0.75, 0.80, 0.85], &[0.0, 0.6, 0.6, 0.0]),
                    scale: Some(Keyframes::new(&[0.70, 0.77], &[0.9, 1.1])),
                },
            ],
            hotspots: vec![
                Hotspot {
                    title: "64MP AI Quad Camera".to_string(),
                    description: "Professional grade sensor array.".to_string(),
                    anchor: [0.50, 0.15],
                    side: TooltipSide::Right,
                },
                Hotspot {
                    title: "Helio G90T".to_string(),
                    description: "Gaming processor with LiquidCool technology.".to_string(),
                    anchor: [0.45, 0.30],
                    side: TooltipSide::Right,
                },
                Hotspot {
                    title: "4500mAh Battery".to_string(),
                    description: "2-day battery life with 18W fast charge.".to_string(),
                    anchor: [0.55, 0.80],
                    side: TooltipSide::Left,
                },
            ],
            hint: Some(ScrollHint {
                text: "Scroll to explore".to_string(),
                opacity: Keyframes::new(&[0.0, 0.1], &[1.0, 0.0]),
            }),
        }
    }
}

impl Scene {
    /// Load and check a scene JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
        let scene: Scene = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;
        scene
            .validate()
            .with_context(|| format!("Invalid scene file: {}", path.display()))?;
        log::info!(
            "Scene loaded from {}: {} captions, {} accents, {} hotspots",
            path.display(),
            scene.captions.len(),
            scene.accents.len(),
            scene.hotspots.len()
        );
        Ok(scene)
    }

    pub fn validate(&self) -> Result<()> {
        for c in &self.captions {
            let [start, end] = c.range;
            if !(start.is_finite() && end.is_finite() && start <= end) {
                bail!("caption '{}': range {:?} must be ascending", c.title, c.range);
            }
        }
        for a in &self.accents {
            if !a.opacity.is_valid() || a.scale.as_ref().is_some_and(|k| !k.is_valid()) {
                bail!("accent '{}': keyframes must be ascending with one value per key", a.name);
            }
        }
        if let Some(hint) = &self.hint
            && !hint.opacity.is_valid()
        {
            bail!("scroll hint: keyframes must be ascending with one value per key");
        }
        Ok(())
    }

    /// Captions with non-zero opacity at `progress`: (caption, opacity, y offset)
    pub fn visible_captions(&self, progress: f32) -> impl Iterator<Item = (&Caption, f32, f32)> {
        self.captions.iter().filter_map(move |c| {
            let opacity = c.opacity(progress);
            (opacity > 0.0).then(|| (c, opacity, c.offset_y(progress)))
        })
    }

    /// Index of the hotspot under `pointer` (surface-local), nearest first
    pub fn hotspot_at(&self, bounds: &LayoutBounds, pointer: (f32, f32), radius: f32) -> Option<usize> {
        self.hotspots
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let (cx, cy) = h.center(bounds);
                let d = ((pointer.0 - cx).powi(2) + (pointer.1 - cy).powi(2)).sqrt();
                (i, d)
            })
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    pub fn hint_opacity(&self, progress: f32) -> f32 {
        self.hint.as_ref().map_or(0.0, |h| h.opacity.at(progress).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn camera_caption() -> Caption {
        Scene::default().captions[1].clone()
    }

    #[test]
    fn test_caption_fade_points() {
        let c = camera_caption();
        let [start, end] = c.range;
        assert!(approx(c.opacity(start), 1.0));
        assert!(approx(c.opacity(end), 1.0));
        assert!(approx(c.opacity(start - CAPTION_FADE), 0.0));
        assert!(approx(c.opacity(end + CAPTION_FADE), 0.0));
        assert!(approx(c.opacity(start - CAPTION_FADE / 2.0), 0.5));
        assert!(approx(c.opacity(end + CAPTION_FADE / 2.0), 0.5));
    }

    #[test]
    fn test_caption_offset() {
        let c = camera_caption();
        let [start, end] = c.range;
        assert!(approx(c.offset_y(start - CAPTION_FADE), CAPTION_SHIFT));
        assert!(approx(c.offset_y((start + end) / 2.0), 0.0));
        assert!(approx(c.offset_y(1.0), -CAPTION_SHIFT));
    }

    #[test]
    fn test_intro_visible_at_top_and_cta_at_bottom() {
        let scene = Scene::default();
        let at_top: Vec<&str> = scene.visible_captions(0.0).map(|(c, _, _)| c.title.as_str()).collect();
        assert_eq!(at_top, vec!["Redmi Note 8 Pro."]);

        let at_bottom: Vec<&Caption> = scene.visible_captions(1.0).map(|(c, _, _)| c).collect();
        assert_eq!(at_bottom.len(), 1);
        assert_eq!(at_bottom[0].action.as_deref(), Some("Experience Now"));
    }

    #[test]
    fn test_default_captions_do_not_overlap() {
        let scene = Scene::default();
        for w in scene.captions.windows(2) {
            assert!(w[0].range[1] < w[1].range[0]);
        }
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_accent_curves() {
        let scene = Scene::default();
        let chip = &scene.accents[2];
        assert!(approx(chip.opacity(0.775), 0.6));
        assert!(approx(chip.opacity(0.5), 0.0));
        assert!(approx(chip.scale(0.70), 0.9));
        assert!(approx(chip.scale(0.90), 1.1));

        let bounds = LayoutBounds { x: 0.0, y: 0.0, w: 1000.0, h: 1000.0 };
        let r = chip.rect_in(&bounds, 0.70);
        assert!(approx(r.w, 150.0 * 0.9));
        // Scaled about its own center
        assert!(approx(r.x + r.w / 2.0, 425.0 + 75.0));
    }

    #[test]
    fn test_hotspot_hit_testing() {
        let scene = Scene::default();
        let bounds = LayoutBounds { x: 420.0, y: 0.0, w: 1080.0, h: 1080.0 };
        let (cx, cy) = scene.hotspots[1].center(&bounds);

        assert_eq!(scene.hotspot_at(&bounds, (cx + 5.0, cy - 5.0), HOTSPOT_RADIUS), Some(1));
        assert_eq!(scene.hotspot_at(&bounds, (0.0, 0.0), HOTSPOT_RADIUS), None);
    }

    #[test]
    fn test_hint_fades_out() {
        let scene = Scene::default();
        assert!(approx(scene.hint_opacity(0.0), 1.0));
        assert!(approx(scene.hint_opacity(0.05), 0.5));
        assert!(approx(scene.hint_opacity(0.5), 0.0));
    }

    #[test]
    fn test_json_roundtrip_and_validation() {
        let json = serde_json::to_string(&Scene::default()).unwrap();
        let parsed: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Scene::default());

        let partial: Scene = serde_json::from_str(
            r#"{ "captions": [ { "title": "Hi", "range": [0.5, 0.2] } ] }"#,
        )
        .unwrap();
        assert!(partial.accents.is_empty());
        assert!(partial.validate().is_err());
    }
}
