//! Projection of the widget state onto drawing primitives.
//!
//! [`project`] is pure: it reads the selection, geometry and steps and emits
//! primitives in paint order. [`replay`] hands them to a host [`DrawSurface`].

use smallvec::SmallVec;

use crate::{
    color::Color,
    config::ThumbImage,
    geometry::{GeometryCache, Rect},
    hit_test::Thumb,
    range::RangeModel,
    steps::StepSet,
    value_space::ValueSpace,
};

/// A host canvas the widget paints onto.
pub trait DrawSurface {
    /// Fills a rectangle with rounded corners.
    fn fill_round_rect(&mut self, rect: Rect, corner_radius: f32, color: Color);
    /// Fills a circle.
    fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Color);
    /// Blits a bitmap with its top-left corner at `(left, top)`.
    fn draw_bitmap(&mut self, image: &image::RgbaImage, left: f32, top: f32);
}

/// Which of the two thumb bitmaps is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbVariant {
    /// The unpressed image.
    Normal,
    /// The pressed image.
    Pressed,
}

/// One paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    /// A track segment.
    RoundRect {
        /// Bounds.
        rect: Rect,
        /// Corner radius.
        corner_radius: f32,
        /// Fill.
        color: Color,
    },
    /// A step marker.
    Circle {
        /// Center x.
        center_x: f32,
        /// Center y.
        center_y: f32,
        /// Radius.
        radius: f32,
        /// Fill.
        color: Color,
    },
    /// A thumb bitmap.
    Bitmap {
        /// The thumb drawn.
        thumb: Thumb,
        /// Which image is used.
        variant: ThumbVariant,
        /// The image.
        image: ThumbImage,
        /// Left edge.
        left: f32,
        /// Top edge.
        top: f32,
    },
}

/// Primitive list; inline capacity covers the tracks, thumbs and a few steps.
pub type DrawList = SmallVec<[DrawPrimitive; 12]>;

/// Everything [`project`] reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Selection and domain.
    pub model: &'a RangeModel,
    /// Cached metrics.
    pub geometry: &'a GeometryCache,
    /// Step fractions.
    pub steps: &'a StepSet,
    /// Whether step markers are drawn.
    pub step_mode: bool,
    /// Widget width.
    pub width: f32,
    /// Widget height.
    pub height: f32,
    /// Rounded track ends.
    pub rounded: bool,
    /// Progress fill.
    pub progress_color: Color,
    /// Background fill.
    pub background_color: Color,
    /// Thumb currently held, if any.
    pub pressed: Thumb,
    /// Unpressed thumb image.
    pub thumb_normal: &'a ThumbImage,
    /// Pressed thumb image.
    pub thumb_pressed: &'a ThumbImage,
}

/// Emits the background track, the progress segment, the step markers (in
/// step mode) and both thumbs, in that order.
pub fn project(input: &RenderInput<'_>) -> DrawList {
    let geometry = input.geometry;
    let space = ValueSpace::new(input.model.domain(), input.width, geometry.padding);
    let center_y = 0.5 * input.height;
    let corner_radius = geometry.corner_radius(input.rounded);
    let min_x = space.to_screen(input.model.normalized_min());
    let max_x = space.to_screen(input.model.normalized_max());

    let mut list = DrawList::new();
    list.push(DrawPrimitive::RoundRect {
        rect: Rect::centered_band(
            geometry.padding,
            input.width - geometry.padding,
            center_y,
            geometry.background_height,
        ),
        corner_radius,
        color: input.background_color,
    });
    list.push(DrawPrimitive::RoundRect {
        rect: Rect::centered_band(min_x, max_x, center_y, geometry.progress_height),
        corner_radius,
        color: input.progress_color,
    });

    if input.step_mode {
        for &fraction in input.steps.fractions() {
            let step_x = space.to_screen(fraction);
            let color = if step_x < min_x || step_x > max_x {
                input.background_color
            } else {
                input.progress_color
            };
            list.push(DrawPrimitive::Circle {
                center_x: step_x,
                center_y,
                radius: geometry.step_radius,
                color,
            });
        }
    }

    for (thumb, x) in [(Thumb::Min, min_x), (Thumb::Max, max_x)] {
        let (variant, image, half_width, half_height) = if input.pressed == thumb {
            (
                ThumbVariant::Pressed,
                input.thumb_pressed,
                geometry.thumb_pressed_half_width,
                geometry.thumb_pressed_half_height,
            )
        } else {
            (
                ThumbVariant::Normal,
                input.thumb_normal,
                geometry.thumb_half_width,
                geometry.thumb_half_height,
            )
        };
        list.push(DrawPrimitive::Bitmap {
            thumb,
            variant,
            image: image.clone(),
            left: x - half_width,
            top: center_y - half_height,
        });
    }

    list
}

/// Paints `primitives` onto `surface` in order.
pub fn replay<S: DrawSurface + ?Sized>(primitives: &[DrawPrimitive], surface: &mut S) {
    for primitive in primitives {
        match primitive {
            DrawPrimitive::RoundRect {
                rect,
                corner_radius,
                color,
            } => surface.fill_round_rect(*rect, *corner_radius, *color),
            DrawPrimitive::Circle {
                center_x,
                center_y,
                radius,
                color,
            } => surface.fill_circle(*center_x, *center_y, *radius, *color),
            DrawPrimitive::Bitmap {
                image, left, top, ..
            } => surface.draw_bitmap(image.image(), *left, *top),
        }
    }
}
