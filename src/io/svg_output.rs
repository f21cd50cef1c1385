use geo::Coord;
use svg::{node::element, Document};

use crate::hull::Planar;
use crate::replay::ReplayData;
use crate::task::SearchPoint;

pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ViewBox {
    pub fn new() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        }
    }

    pub fn include(&mut self, (x, y): (f64, f64)) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn add_margin(&mut self, margin: f64) {
        self.min_x -= margin;
        self.min_y -= margin;
        self.max_x += margin;
        self.max_y += margin;
    }

    pub fn get(&self) -> (f64, f64, f64, f64) {
        (self.min_x, self.min_y, self.max_x - self.min_x, self.max_y - self.min_y)
    }
}

/// SVG has `y` growing downwards, the task frame has it pointing north.
fn to_svg(c: Coord) -> (f64, f64) {
    (c.x, -c.y)
}

fn make_svg_path(points: impl IntoIterator<Item = Coord>, close: bool, view_box: &mut ViewBox) -> Option<element::Path> {
    let mut points = points.into_iter();
    let p0 = to_svg(points.next()?);

    let mut data = element::path::Data::new();
    data = data.move_to(p0);
    view_box.include(p0);

    for p in points {
        let p = to_svg(p);
        data = data.line_to(p);
        view_box.include(p);
    }

    if close {
        data = data.close();
    }

    Some(element::Path::new()
        .set("d", data)
        .set("vector-effect", "non-scaling-stroke"))
}

fn make_svg_outlines<'a>(outlines: impl Iterator<Item = &'a [SearchPoint]>, fill: &str, stroke: &str, view_box: &mut ViewBox) -> element::Group {
    let mut g_outlines = element::Group::new()
        .set("fill", fill)
        .set("stroke", stroke)
        .set("stroke-width", 1);

    for outline in outlines {
        if let Some(path) = make_svg_path(outline.iter().map(Planar::flat), true, view_box) {
            g_outlines = g_outlines.add(path);
        }
    }

    g_outlines
}

fn make_svg_markers(points: impl Iterator<Item = Coord>, radius: f64, fill: &str, view_box: &mut ViewBox) -> element::Group {
    let mut g_markers = element::Group::new()
        .set("fill", fill)
        .set("stroke", "none");

    for p in points {
        let (x, y) = to_svg(p);
        view_box.include((x, y));

        g_markers = g_markers.add(element::Circle::new()
            .set("cx", x)
            .set("cy", y)
            .set("r", radius));
    }

    g_markers
}

/// Draws the zones, the sample hulls, the nominal course and the track.
pub fn make_svg(data: &ReplayData) -> Document {
    let mut view_box = ViewBox::new();
    let projection = data.task.projection();
    let points = data.task.points();

    let mut doc = Document::new();

    let boundaries = points.iter().map(|tp| tp.sampled().get_boundary_points());
    doc = doc.add(make_svg_outlines(boundaries, "none", "#4774AAFF", &mut view_box));

    let samples = points.iter().map(|tp| tp.sampled().get_sample_points());
    doc = doc.add(make_svg_outlines(samples, "#32954455", "#329544FF", &mut view_box));

    let course = points.iter().map(|tp| projection.project(tp.location()));
    if let Some(path) = make_svg_path(course, false, &mut view_box) {
        doc = doc.add(path.set("fill", "none").set("stroke", "#893566FF").set("stroke-dasharray", "4 4"));
    }

    let track = data.track.iter().map(|state| projection.project(state.location));
    if let Some(path) = make_svg_path(track, false, &mut view_box) {
        doc = doc.add(path.set("fill", "none").set("stroke", "black"));
    }

    let scored = points.iter().map(|tp| projection.project(tp.reference_scored()));
    doc = doc.add(make_svg_markers(scored, 40.0, "red", &mut view_box));

    view_box.add_margin(500.0);

    doc.set("viewBox", view_box.get())
}
