//! Skyline model
//!
//! Tracks the occupied-height profile of the container as a list of
//! [`Band`]s. The bands always partition `[0, container_width)`: every x
//! position belongs to exactly one band, and the band's depth is the lowest
//! occupied edge above that position.

use std::cmp::Ordering;

use log::trace;

use mason_core::geometry::{Point, Size};

/// A horizontal interval `[start, end)` built up to `depth`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    start: f32,
    end: f32,
    depth: f32,
}

impl Band {
    pub fn new(start: f32, end: f32, depth: f32) -> Self {
        Self { start, end, depth }
    }

    /// Left edge, inclusive
    pub fn start(self) -> f32 {
        self.start
    }

    /// Right edge, exclusive
    pub fn end(self) -> f32 {
        self.end
    }

    /// Occupied depth of the interval
    pub fn depth(self) -> f32 {
        self.depth
    }

    pub fn width(self) -> f32 {
        self.end - self.start
    }

    fn is_empty(self) -> bool {
        self.end <= self.start
    }

    fn overlaps(self, start: f32, end: f32) -> bool {
        self.start < end && start < self.end
    }

    /// Ordering used for attach-point search: shallow first, then leftmost.
    fn cmp_depth_then_x(&self, other: &Self) -> Ordering {
        self.depth
            .total_cmp(&other.depth)
            .then_with(|| self.start.total_cmp(&other.start))
    }
}

/// The occupied-height profile of a container.
#[derive(Debug, Clone)]
pub struct Skyline {
    container_width: f32,
    /// Sorted by `start`, contiguous, covering `[0, container_width)`.
    bands: Vec<Band>,
}

impl Skyline {
    /// Create a flat skyline for a container of the given width.
    pub fn new(container_width: f32) -> Self {
        let mut skyline = Self {
            container_width: 0.0,
            bands: Vec::new(),
        };
        skyline.reset(container_width);
        skyline
    }

    /// Reinitialize to a single band `[0, container_width)` at depth 0.
    ///
    /// Non-positive or non-finite widths collapse to an empty container; every
    /// placement then falls back to `(0, max_depth)`.
    pub fn reset(&mut self, container_width: f32) {
        let width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        self.container_width = width;
        self.bands.clear();
        self.bands.push(Band::new(0.0, width, 0.0));
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// The bands in left-to-right order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Depth of the deepest band.
    pub fn max_depth(&self) -> f32 {
        self.bands
            .iter()
            .map(|band| band.depth)
            .fold(0.0, f32::max)
    }

    /// Find where a rectangle of the given width attaches.
    ///
    /// Bands are scanned shallowest first (ties broken leftmost). The scan
    /// stops at the first band that is as deep as the deepest band; before
    /// that, the first band wide enough wins and the rectangle sits at its
    /// left edge. If none qualifies, the rectangle starts a new row flush left
    /// at the deepest extent. A non-positive width always starts a new row.
    pub fn best_attach_point(&self, width: f32) -> Point {
        let max_depth = self.max_depth();
        if width <= 0.0 {
            return Point::new(0.0, max_depth);
        }

        let mut ordered: Vec<Band> = self.bands.clone();
        ordered.sort_by(Band::cmp_depth_then_x);

        ordered
            .iter()
            .take_while(|band| band.depth < max_depth)
            .find(|band| band.width() >= width)
            .map(|band| Point::new(band.start, band.depth))
            .unwrap_or_else(|| Point::new(0.0, max_depth))
    }

    /// Record a rectangle of `size` placed at `point`.
    ///
    /// Bands fully covered by the rectangle's horizontal footprint are
    /// dropped. A partially covered band is trimmed to the part outside the
    /// footprint: if the rectangle's left edge lies strictly inside it, the
    /// band keeps its left part, otherwise its right part. A band reaching past
    /// both edges keeps both parts. The footprint then becomes a new band at
    /// `point.y + size.height`, merged with equal-depth neighbours.
    pub fn commit_placement(&mut self, point: Point, size: Size) {
        let start = point.x().max(0.0);
        let end = (point.x() + size.width()).min(self.container_width);
        if end <= start {
            trace!(x = point.x(), width = size.width(); "Skipping empty footprint");
            return;
        }
        let depth = point.y() + size.height();

        let mut trimmed: Vec<Band> = Vec::with_capacity(self.bands.len() + 2);
        for band in self.bands.drain(..) {
            if !band.overlaps(start, end) {
                trimmed.push(band);
                continue;
            }
            if band.start < start {
                trimmed.push(Band::new(band.start, start, band.depth));
            }
            if end < band.end {
                trimmed.push(Band::new(end, band.end, band.depth));
            }
        }
        self.bands = trimmed;
        self.bands.retain(|band| !band.is_empty());

        let at = self
            .bands
            .iter()
            .position(|band| band.start >= end)
            .unwrap_or(self.bands.len());
        self.bands.insert(at, Band::new(start, end, depth));

        self.merge_adjacent();

        trace!(bands:? = self.bands; "Skyline updated");
    }

    fn merge_adjacent(&mut self) {
        let mut merged: Vec<Band> = Vec::with_capacity(self.bands.len());
        for band in self.bands.drain(..) {
            match merged.last_mut() {
                Some(last) if last.end == band.start && last.depth == band.depth => {
                    last.end = band.end;
                }
                _ => merged.push(band),
            }
        }
        self.bands = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band_tuples(skyline: &Skyline) -> Vec<(f32, f32, f32)> {
        skyline
            .bands()
            .iter()
            .map(|b| (b.start(), b.end(), b.depth()))
            .collect()
    }

    #[test]
    fn test_reset_creates_single_flat_band() {
        let mut skyline = Skyline::new(100.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(40.0, 40.0));

        skyline.reset(620.0);

        assert_eq!(band_tuples(&skyline), vec![(0.0, 620.0, 0.0)]);
        assert_eq!(skyline.container_width(), 620.0);
        assert_eq!(skyline.max_depth(), 0.0);
    }

    #[test]
    fn test_reset_with_degenerate_width() {
        let skyline = Skyline::new(-10.0);
        assert_eq!(band_tuples(&skyline), vec![(0.0, 0.0, 0.0)]);

        let skyline = Skyline::new(f32::NAN);
        assert_eq!(skyline.container_width(), 0.0);
    }

    #[test]
    fn test_flat_skyline_attaches_top_left() {
        let skyline = Skyline::new(620.0);
        assert_eq!(skyline.best_attach_point(200.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_commit_trims_left_part_of_covered_band() {
        let mut skyline = Skyline::new(620.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(200.0, 400.0));

        assert_eq!(
            band_tuples(&skyline),
            vec![(0.0, 200.0, 400.0), (200.0, 620.0, 0.0)]
        );
    }

    #[test]
    fn test_attach_prefers_shallowest_wide_enough_band() {
        let mut skyline = Skyline::new(620.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(200.0, 400.0));

        assert_eq!(skyline.best_attach_point(400.0), Point::new(200.0, 0.0));
    }

    #[test]
    fn test_attach_skips_narrow_bands() {
        let mut skyline = Skyline::new(620.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(200.0, 400.0));
        skyline.commit_placement(Point::new(200.0, 0.0), Size::new(400.0, 200.0));

        // [600, 620) at depth 0 is too narrow; [200, 600) at depth 200 fits.
        assert_eq!(skyline.best_attach_point(200.0), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_attach_falls_back_to_new_row_at_max_depth() {
        let mut skyline = Skyline::new(620.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(600.0, 400.0));

        // Only [600, 620) is shallower than the deepest band and it is too narrow.
        assert_eq!(skyline.best_attach_point(100.0), Point::new(0.0, 400.0));
    }

    #[test]
    fn test_attach_never_uses_band_at_max_depth() {
        let mut skyline = Skyline::new(300.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        skyline.commit_placement(Point::new(100.0, 0.0), Size::new(100.0, 50.0));

        // Bands: [0,100)@100, [100,200)@50, [200,300)@0.
        assert_eq!(skyline.best_attach_point(100.0), Point::new(200.0, 0.0));
        // Nothing shallower fits 150 wide, so start a new row.
        assert_eq!(skyline.best_attach_point(150.0), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_commit_keeps_left_part_when_rectangle_starts_inside_band() {
        let mut skyline = Skyline::new(300.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(200.0, 40.0));
        skyline.commit_placement(Point::new(100.0, 40.0), Size::new(150.0, 20.0));

        // [0,200)@40 keeps [0,100); [200,300)@0 keeps [250,300).
        assert_eq!(
            band_tuples(&skyline),
            vec![(0.0, 100.0, 40.0), (100.0, 250.0, 60.0), (250.0, 300.0, 0.0)]
        );
    }

    #[test]
    fn test_commit_inside_single_band_keeps_both_sides() {
        let mut skyline = Skyline::new(300.0);
        skyline.commit_placement(Point::new(100.0, 0.0), Size::new(50.0, 20.0));

        assert_eq!(
            band_tuples(&skyline),
            vec![(0.0, 100.0, 0.0), (100.0, 150.0, 20.0), (150.0, 300.0, 0.0)]
        );
        let covered: f32 = skyline.bands().iter().map(|band| band.width()).sum();
        assert_eq!(covered, 300.0);
    }

    #[test]
    fn test_commit_merges_equal_depth_neighbours() {
        let mut skyline = Skyline::new(400.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(200.0, 100.0));
        skyline.commit_placement(Point::new(200.0, 0.0), Size::new(200.0, 100.0));

        assert_eq!(band_tuples(&skyline), vec![(0.0, 400.0, 100.0)]);
    }

    #[test]
    fn test_commit_removes_fully_covered_bands() {
        let mut skyline = Skyline::new(600.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(200.0, 50.0));
        skyline.commit_placement(Point::new(200.0, 0.0), Size::new(200.0, 80.0));

        skyline.commit_placement(Point::new(0.0, 80.0), Size::new(500.0, 10.0));

        assert_eq!(
            band_tuples(&skyline),
            vec![(0.0, 500.0, 90.0), (500.0, 600.0, 0.0)]
        );
    }

    #[test]
    fn test_commit_clips_footprint_wider_than_container() {
        let mut skyline = Skyline::new(300.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(500.0, 60.0));

        assert_eq!(band_tuples(&skyline), vec![(0.0, 300.0, 60.0)]);
    }

    #[test]
    fn test_commit_ignores_zero_width_footprint() {
        let mut skyline = Skyline::new(300.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(0.0, 60.0));

        assert_eq!(band_tuples(&skyline), vec![(0.0, 300.0, 0.0)]);
    }

    #[test]
    fn test_zero_width_request_attaches_at_max_depth() {
        let skyline = Skyline::new(0.0);
        assert_eq!(skyline.best_attach_point(0.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_zero_width_request_on_stepped_skyline_starts_new_row() {
        let mut skyline = Skyline::new(300.0);
        skyline.commit_placement(Point::new(0.0, 0.0), Size::new(100.0, 100.0));

        // Bands: [0,100)@100, [100,300)@0.
        assert_eq!(skyline.best_attach_point(0.0), Point::new(0.0, 100.0));
        assert_eq!(skyline.best_attach_point(-5.0), Point::new(0.0, 100.0));
    }
}
