// Author: Dustin Pilgrim
// License: MIT
//
// The engine owns the quad and the drag session. Every pointer event goes
// through one of the `on_pointer_*` entry points, synchronously and in
// delivery order; nothing here is meant to be shared across threads.

use eventline::{debug, warn};

use quadcrop_core::{
    DisplayMatrix, EdgeMidpoints, HandleType, ImageSize, Point, Quad, ViewportState,
};

use crate::config::EngineConfig;
use crate::constraint::{self, MoveVerdict};
use crate::crop::{CropError, Cropper};
use crate::magnifier::Loupe;
use crate::resolver;
use crate::session::DragSession;

/// What `set_points` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsUpdate {
    Applied,
    /// Input was absent, incomplete or outside the image.
    FullImageFallback,
    /// No image yet; nothing changed.
    NoImage,
}

#[derive(Debug, Default)]
pub struct CropEngine {
    config: EngineConfig,

    image: Option<ImageSize>,
    quad: Option<Quad>,
    midpoints: Option<EdgeMidpoints>,

    display: DisplayMatrix,
    viewport: ViewportState,

    session: DragSession,
}

impl CropEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn set_drag_limit(&mut self, drag_limit: bool) {
        self.config.drag_limit = drag_limit;
    }

    // -------------------- image + points --------------------

    /// Load a new image: any drag ends and the crop resets to the full image.
    pub fn set_image(&mut self, size: ImageSize) {
        debug!("image set: {}x{}", size.width, size.height);
        self.session.end();
        self.image = Some(size);
        self.quad = None;
        self.refresh_viewport();
        self.set_points(None);
    }

    pub fn image(&self) -> Option<ImageSize> {
        self.image
    }

    pub fn set_points(&mut self, points: Option<&[Option<Point>]>) -> PointsUpdate {
        let Some(image) = self.image else {
            warn!("set_points called before an image was set; ignoring");
            return PointsUpdate::NoImage;
        };

        let parsed = points
            .ok_or(None)
            .and_then(|pts| Quad::from_points_within(pts, image).map_err(Some));

        match parsed {
            Ok(quad) => {
                self.quad = Some(quad);
                PointsUpdate::Applied
            }
            Err(e) => {
                if let Some(e) = e {
                    debug!("crop points rejected ({e}); using full image");
                }
                self.quad = Some(Quad::full_image(image));
                PointsUpdate::FullImageFallback
            }
        }
    }

    pub fn set_quad(&mut self, quad: Quad) -> PointsUpdate {
        let points = quad.corners().map(Some);
        self.set_points(Some(&points))
    }

    pub fn set_full_image_crop(&mut self) -> PointsUpdate {
        let Some(image) = self.image else {
            warn!("set_full_image_crop called before an image was set; ignoring");
            return PointsUpdate::NoImage;
        };
        self.quad = Some(Quad::full_image(image));
        PointsUpdate::Applied
    }

    pub fn points(&self) -> Option<Quad> {
        self.quad
    }

    /// Current edge midpoints, recomputed from the corners on every call.
    pub fn edge_midpoints(&mut self) -> Option<EdgeMidpoints> {
        self.sync_midpoints().copied()
    }

    fn sync_midpoints(&mut self) -> Option<&EdgeMidpoints> {
        let quad = self.quad?;
        let mids = self.midpoints.get_or_insert_with(EdgeMidpoints::default);
        mids.recompute(&quad);
        Some(mids)
    }

    /// The current quad is a usable perspective-crop region.
    pub fn can_right_crop(&self) -> bool {
        self.quad.is_some_and(|q| q.is_convex())
    }

    /// Image-space position of a handle in the current quad.
    pub fn handle_position(&self, handle: HandleType) -> Option<Point> {
        let quad = self.quad?;
        Some(match handle {
            HandleType::Corner(c) => quad.corner(c),
            HandleType::Edge(e) => quad.edge_midpoints().get(e),
        })
    }

    // -------------------- layout --------------------

    /// Host layout for the coming frame.
    pub fn set_display(&mut self, display: DisplayMatrix) {
        self.display = display;
        self.refresh_viewport();
    }

    pub fn display(&self) -> &DisplayMatrix {
        &self.display
    }

    /// Recompute the viewport from the image and the latest display matrix.
    pub fn refresh_viewport(&mut self) -> ViewportState {
        self.viewport = match self.image {
            Some(image) => ViewportState::compute(image, &self.display),
            None => ViewportState::default(),
        };
        self.viewport
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    // -------------------- pointer events --------------------

    pub fn active_handle(&self) -> Option<HandleType> {
        self.session.active()
    }

    /// Starts a drag if a handle is under the pointer. Returns whether the
    /// event was consumed.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> bool {
        let viewport = self.refresh_viewport();
        if !viewport.is_usable() {
            return false;
        }
        let Some(quad) = self.quad else {
            return false;
        };

        let radius = self.display.dp(self.config.catch_radius);
        let midpoints = if self.config.show_edge_midpoints {
            self.sync_midpoints().copied()
        } else {
            None
        };

        match resolver::find_handle(x, y, &quad, midpoints.as_ref(), &viewport, radius) {
            Some(handle) => {
                debug!("drag start: {handle:?} at ({x}, {y})");
                self.session.begin(handle);
                true
            }
            None => {
                self.session.end();
                false
            }
        }
    }

    /// Moves the active handle toward the pointer. A move with no active
    /// drag is ignored and not consumed.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some(handle) = self.session.active() else {
            return false;
        };

        let viewport = self.refresh_viewport();
        if viewport.is_usable() {
            let candidate = viewport.view_to_image(x, y);
            let verdict = self.drag_handle_to(handle, candidate);
            if !verdict.is_committed() {
                debug!("{handle:?} -> ({}, {}) rejected: {verdict:?}", candidate.x, candidate.y);
            }
        }
        true
    }

    pub fn on_pointer_up(&mut self) -> bool {
        match self.session.end() {
            Some(handle) => {
                debug!("drag end: {handle:?}");
                true
            }
            None => false,
        }
    }

    /// Same as pointer-up: the last committed position stays.
    pub fn on_pointer_cancel(&mut self) -> bool {
        match self.session.end() {
            Some(handle) => {
                debug!("drag cancelled: {handle:?}");
                true
            }
            None => false,
        }
    }

    /// Image-space drag of `handle` to `candidate`, through the same bounds
    /// and shape checks a pointer move goes through.
    pub fn drag_handle_to(&mut self, handle: HandleType, candidate: Point) -> MoveVerdict {
        let (Some(image), Some(mut quad)) = (self.image, self.quad) else {
            return MoveVerdict::OutOfBounds;
        };
        let drag_limit = self.config.drag_limit;

        let verdict = match handle {
            HandleType::Corner(c) => constraint::drag_corner(&mut quad, c, candidate, image, drag_limit),
            HandleType::Edge(e) => {
                let midpoint = match self.sync_midpoints() {
                    Some(m) => m.get(e),
                    None => return MoveVerdict::OutOfBounds,
                };
                constraint::drag_edge(&mut quad, e, midpoint, candidate, image, drag_limit)
            }
        };

        if verdict.is_committed() {
            self.quad = Some(quad);
            self.sync_midpoints();
        }
        verdict
    }

    // -------------------- magnifier --------------------

    /// Loupe for the active drag, when the magnifier is enabled.
    pub fn magnifier(&self) -> Option<Loupe> {
        if !self.config.show_magnifier || !self.viewport.is_usable() {
            return None;
        }
        let handle = self.session.active()?;
        let image = self.image?;
        let position = self.handle_position(handle)?;

        Some(Loupe::place(
            handle,
            position,
            image,
            &self.viewport,
            &self.display,
            self.config.magnifier_zoom,
        ))
    }

    // -------------------- crop boundary --------------------

    /// Validate `points` and hand them to `cropper`.
    pub fn crop_with<C: Cropper>(
        &self,
        points: Option<&[Option<Point>]>,
        cropper: &mut C,
    ) -> Result<C::Output, CropError<C::Error>> {
        let image = self.image.ok_or(CropError::NoImage)?;
        let quad = Quad::from_points_within(points.unwrap_or(&[]), image)?;
        cropper.crop(image, &quad).map_err(CropError::Cropper)
    }

    pub fn crop_current<C: Cropper>(&self, cropper: &mut C) -> Result<C::Output, CropError<C::Error>> {
        let points = self.quad.map(|q| q.corners().map(Some));
        self.crop_with(points.as_ref().map(|p| p.as_slice()), cropper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadcrop_core::{Corner, Edge, QuadError};

    fn engine() -> CropEngine {
        let mut e = CropEngine::new(EngineConfig::default());
        e.set_image(ImageSize::new(1000, 2000));
        // 1:2 scale, image fills a 500x1000 view exactly
        e.set_display(DisplayMatrix {
            view_width: 500,
            view_height: 1000,
            scale_x: 0.5,
            scale_y: 0.5,
            density: 1.0,
        });
        e
    }

    #[test]
    fn set_image_installs_full_crop() {
        let e = engine();
        assert_eq!(e.points(), Some(Quad::full_image(ImageSize::new(1000, 2000))));
        assert!(e.can_right_crop());
    }

    #[test]
    fn no_image_means_no_op() {
        let mut e = CropEngine::default();
        let p = Some(Point::new(0, 0));
        assert_eq!(e.set_points(Some(&[p, p, p, p])), PointsUpdate::NoImage);
        assert_eq!(e.set_full_image_crop(), PointsUpdate::NoImage);
        assert_eq!(e.points(), None);
        assert!(!e.can_right_crop());
        assert!(!e.on_pointer_down(0.0, 0.0));
    }

    #[test]
    fn invalid_points_fall_back_to_full_image() {
        let mut e = engine();
        let full = e.points();
        let p = Some(Point::new(10, 10));

        assert_eq!(e.set_points(Some(&[p, p, None, p])), PointsUpdate::FullImageFallback);
        assert_eq!(e.points(), full);
        assert_eq!(e.set_points(Some(&[p, p])), PointsUpdate::FullImageFallback);
        assert_eq!(e.set_points(None), PointsUpdate::FullImageFallback);

        let outside = Some(Point::new(5000, 10));
        assert_eq!(e.set_points(Some(&[p, outside, p, p])), PointsUpdate::FullImageFallback);
        assert_eq!(e.points(), full);
    }

    #[test]
    fn valid_points_are_applied() {
        let mut e = engine();
        let q = Quad::new([
            Point::new(10, 20),
            Point::new(900, 30),
            Point::new(950, 1900),
            Point::new(40, 1800),
        ]);
        assert_eq!(e.set_quad(q), PointsUpdate::Applied);
        assert_eq!(e.points(), Some(q));
    }

    #[test]
    fn full_image_crop_is_idempotent() {
        let mut e = engine();
        e.set_full_image_crop();
        let first = e.points();
        e.set_full_image_crop();
        assert_eq!(e.points(), first);
    }

    #[test]
    fn tap_away_from_handles_is_not_consumed() {
        let mut e = engine();
        assert!(!e.on_pointer_down(250.0, 250.0));
        assert_eq!(e.active_handle(), None);
        assert!(!e.on_pointer_move(260.0, 260.0));
        assert!(!e.on_pointer_up());
    }

    #[test]
    fn corner_drag_through_events() {
        let mut e = engine();
        assert!(e.on_pointer_down(2.0, 2.0));
        assert_eq!(e.active_handle(), Some(HandleType::Corner(Corner::LeftTop)));

        // view (50, 50) is image (100, 100)
        assert!(e.on_pointer_move(50.0, 50.0));
        assert_eq!(e.points().map(|q| q.corner(Corner::LeftTop)), Some(Point::new(100, 100)));

        // past the diagonal: frozen in place
        assert!(e.on_pointer_move(250.0, 999.5));
        assert_eq!(e.points().map(|q| q.corner(Corner::LeftTop)), Some(Point::new(100, 100)));

        assert!(e.on_pointer_up());
        assert_eq!(e.active_handle(), None);
        assert!(e.can_right_crop());
    }

    #[test]
    fn edge_drag_through_events() {
        let mut e = engine();
        // top midpoint: image (500, 0) -> view (250, 0)
        assert!(e.on_pointer_down(250.0, 3.0));
        assert_eq!(e.active_handle(), Some(HandleType::Edge(Edge::Top)));

        assert!(e.on_pointer_move(260.0, 25.0));
        let q = e.points().unwrap();
        assert_eq!(q.corner(Corner::LeftTop), Point::new(0, 50));
        assert_eq!(q.corner(Corner::RightTop), Point::new(1000, 50));
        assert_eq!(e.edge_midpoints().map(|m| m.get(Edge::Top)), Some(Point::new(500, 50)));
        assert!(e.on_pointer_cancel());
    }

    #[test]
    fn hidden_midpoints_cannot_be_grabbed() {
        let mut e = engine();
        e.config_mut().show_edge_midpoints = false;
        assert!(!e.on_pointer_down(250.0, 3.0));
    }

    #[test]
    fn catch_radius_scales_with_density() {
        let mut e = engine();
        assert!(!e.on_pointer_down(20.0, 0.0));

        let mut d = *e.display();
        d.density = 2.0;
        e.set_display(d);
        assert!(e.on_pointer_down(20.0, 0.0));
    }

    #[test]
    fn cancel_keeps_committed_moves() {
        let mut e = engine();
        e.on_pointer_down(500.0, 1000.0);
        e.on_pointer_move(450.0, 900.0);
        assert!(e.on_pointer_cancel());
        assert_eq!(
            e.points().map(|q| q.corner(Corner::RightBottom)),
            Some(Point::new(900, 1800))
        );
        assert!(!e.on_pointer_cancel());
    }

    #[test]
    fn unusable_layout_ignores_pointer() {
        let mut e = CropEngine::default();
        e.set_image(ImageSize::new(100, 100));
        assert!(!e.on_pointer_down(0.0, 0.0));
    }

    #[test]
    fn magnifier_follows_active_drag() {
        let mut e = engine();
        assert!(e.magnifier().is_none());
        e.on_pointer_down(0.0, 0.0);
        let loupe = e.magnifier().unwrap();
        assert_eq!(loupe.focus, e.viewport().image_to_view(Point::new(0, 0)));

        e.config_mut().show_magnifier = false;
        assert!(e.magnifier().is_none());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("refused")]
    struct Refused;

    struct Recorder {
        seen: Vec<Quad>,
        fail: bool,
    }

    impl Cropper for Recorder {
        type Output = (i32, i32);
        type Error = Refused;

        fn crop(&mut self, image: ImageSize, quad: &Quad) -> Result<(i32, i32), Refused> {
            if self.fail {
                return Err(Refused);
            }
            self.seen.push(*quad);
            Ok((image.width, image.height))
        }
    }

    #[test]
    fn crop_validates_before_delegating() {
        let e = engine();
        let mut r = Recorder { seen: Vec::new(), fail: false };

        let p = Some(Point::new(1, 1));
        let err = e.crop_with(Some(&[p, p, p]), &mut r).unwrap_err();
        assert!(matches!(err, CropError::InvalidPoints(QuadError::WrongCount(3))));
        assert!(r.seen.is_empty());

        assert_eq!(e.crop_current(&mut r).unwrap(), (1000, 2000));
        assert_eq!(r.seen, vec![Quad::full_image(ImageSize::new(1000, 2000))]);

        r.fail = true;
        assert!(matches!(e.crop_current(&mut r), Err(CropError::Cropper(Refused))));

        let empty = CropEngine::default();
        assert!(matches!(empty.crop_current(&mut r), Err(CropError::NoImage)));
    }
}
