use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOpts, KeyframeTable},
    compositions::{Composition, CompositionId, presets::Preset},
    foundation::core::{Color, FrameContext, Rect, Timeline, Transform2D, Vec2},
    foundation::error::{FramewrightError, FramewrightResult},
    scene::model::{SceneGraph, SceneNode},
};

/// Parameters of the `image-animation` composition.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageAnimationConfig {
    /// Path or key of the still image; resolved by the image store.
    pub image: String,
    /// Camera move; default `ken-burns`.
    pub preset: Preset,
    /// Easing over the whole move; default linear.
    pub ease: Ease,
    /// Fill behind the image; black when unset.
    pub background: Option<Color>,
}

impl ImageAnimationConfig {
    /// The image href must be non-empty.
    pub fn validate(&self) -> FramewrightResult<()> {
        if self.image.trim().is_empty() {
            return Err(FramewrightError::config("image-animation requires an image"));
        }
        self.ease.validate()
    }
}

/// Camera state of one frame. Offsets are percentages of the canvas size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraState {
    /// Zoom factor about the canvas center.
    pub scale: f64,
    /// Horizontal shift, percent of canvas width.
    pub offset_x: f64,
    /// Vertical shift, percent of canvas height.
    pub offset_y: f64,
}

impl CameraState {
    /// Scale about the canvas center, then shift by the offsets.
    pub fn transform(&self, canvas_size: Vec2) -> Transform2D {
        Transform2D {
            translate: Vec2::new(
                self.offset_x / 100.0 * canvas_size.x,
                self.offset_y / 100.0 * canvas_size.y,
            ),
            rotation_rad: 0.0,
            scale: Vec2::new(self.scale, self.scale),
            anchor: canvas_size * 0.5,
        }
    }
}

/// Still image moved by a named preset.
pub struct ImageAnimation {
    config: ImageAnimationConfig,
    timeline: Timeline,
    scale: KeyframeTable<f64>,
    offset_x: KeyframeTable<f64>,
    offset_y: KeyframeTable<f64>,
}

impl ImageAnimation {
    /// Build the preset tables over `[0, total_frames]`, clamped.
    pub fn new(config: ImageAnimationConfig, timeline: Timeline) -> FramewrightResult<Self> {
        config.validate()?;
        timeline.validate()?;
        let motion = config.preset.motion();
        let opts = InterpolateOpts::clamped().with_ease(config.ease);
        let input = vec![0.0, timeline.total_frames as f64];
        let table = |(from, to): (f64, f64)| KeyframeTable::new(input.clone(), vec![from, to], opts);
        Ok(Self {
            scale: table(motion.scale)?,
            offset_x: table(motion.offset_x)?,
            offset_y: table(motion.offset_y)?,
            config,
            timeline,
        })
    }

    /// The configured preset.
    pub fn preset(&self) -> Preset {
        self.config.preset
    }

    /// Camera at `frame`; holds the final state past the end.
    pub fn camera(&self, frame: u64) -> CameraState {
        let x = frame as f64;
        CameraState {
            scale: self.scale.sample(x),
            offset_x: self.offset_x.sample(x),
            offset_y: self.offset_y.sample(x),
        }
    }
}

impl Composition for ImageAnimation {
    fn id(&self) -> CompositionId {
        CompositionId::ImageAnimation
    }

    fn timeline(&self) -> Timeline {
        self.timeline
    }

    fn render(&self, ctx: &FrameContext) -> SceneGraph {
        let size = ctx.canvas.size();
        let mut scene = SceneGraph::new(ctx.canvas, self.config.background.unwrap_or(Color::BLACK));
        let camera = self.camera(ctx.frame.0);
        scene.push(SceneNode::group(
            camera.transform(size).to_affine(),
            vec![SceneNode::Image {
                href: self.config.image.clone(),
                rect: Rect::new(0.0, 0.0, size.x, size.y),
                opacity: 1.0,
            }],
        ));
        scene
    }

    fn image_hrefs(&self) -> Vec<&str> {
        vec![self.config.image.as_str()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/image_animation.rs"]
mod tests;
