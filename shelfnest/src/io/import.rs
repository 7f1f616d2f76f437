use log::{debug, info, warn};

use crate::entities::Item;
use crate::geometry::primitives::{Point, Polygon};
use crate::io::SvgDocument;
use crate::io::SvgElement;
use crate::io::document::parse_number_list;
use crate::io::transform::AffineTransform;
use crate::{NestError, Result};

/// Drawable primitive found in a source document.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Closed polygon or polyline
    Polygon(Vec<Point>),
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line(Point, Point),
    /// All endpoints and control points of a path
    Path(Vec<Point>),
}

/// Font metrics of a document containing a single glyph.
#[derive(Clone, Debug, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub horiz_adv_x: Option<f64>,
    pub units_per_em: Option<f64>,
    pub ascent: Option<f64>,
    pub descent: Option<f64>,
}

/// Everything the shape extraction needs to know about a source document.
pub trait ShapeSource {
    fn identifier(&self) -> &str;

    /// Every drawable primitive, wherever it appears in the document, in document coordinates
    fn primitives(&self) -> Vec<Primitive>;

    /// Declared view rectangle: `[x, y, width, height]`
    fn view_box(&self) -> Option<[f64; 4]>;

    /// Declared `(width, height)`
    fn dimensions(&self) -> Option<(f64, f64)>;

    fn glyph_metrics(&self) -> Option<GlyphMetrics>;
}

impl Primitive {
    pub fn to_polygon(&self) -> Result<Polygon> {
        match self {
            Primitive::Rectangle {
                x,
                y,
                width,
                height,
            } => Polygon::from_box(*x, *y, x + width, y + height),
            Primitive::Polygon(points) => {
                if points.len() < 3 {
                    return Err(NestError::InvalidGeometry(format!(
                        "polygon primitive needs at least 3 vertices, got {}",
                        points.len()
                    )));
                }
                Polygon::new(points.clone())
            }
            Primitive::Circle { cx, cy, r } => Polygon::from_box(cx - r, cy - r, cx + r, cy + r),
            Primitive::Ellipse { cx, cy, rx, ry } => {
                Polygon::from_box(cx - rx, cy - ry, cx + rx, cy + ry)
            }
            Primitive::Line(a, b) => Polygon::new(vec![*a, *b]),
            Primitive::Path(points) => Polygon::new(points.clone()),
        }
    }

    /// Rectangles, circles and ellipses become the polygon of their transformed bounding-box corners.
    pub(crate) fn transform(&self, m: &AffineTransform) -> Primitive {
        if m.is_identity() {
            return self.clone();
        }
        let map = |points: &[Point]| -> Vec<Point> {
            points.iter().map(|&p| m.apply(p)).collect()
        };
        match self {
            Primitive::Line(a, b) => Primitive::Line(m.apply(*a), m.apply(*b)),
            Primitive::Polygon(points) => Primitive::Polygon(map(points)),
            Primitive::Path(points) => Primitive::Path(map(points)),
            Primitive::Rectangle { .. } | Primitive::Circle { .. } | Primitive::Ellipse { .. } => {
                match self.to_polygon() {
                    Ok(p) => Primitive::Polygon(map(p.vertices())),
                    // reported by extract_shape
                    Err(_) => self.clone(),
                }
            }
        }
    }
}

/// Resolves the representative polygon of a source document.
///
/// The first rule that applies wins:
/// 1. the bounding-box union of all drawable primitives
/// 2. the view box
/// 3. the declared width and height, anchored at the origin
/// 4. the glyph metrics: `(0, descent, advance, ascent)`
///
/// If none applies, [`NestError::BoundsUndeterminable`] is returned.
pub fn extract_shape(source: &impl ShapeSource) -> Result<Polygon> {
    let id = source.identifier();

    let from_primitives = source
        .primitives()
        .iter()
        .filter_map(|prim| match prim.to_polygon() {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("[IMPORT] skipping primitive in {id}: {e}");
                None
            }
        })
        .reduce(|acc, p| acc.bbox_union(&p));
    if let Some(shape) = from_primitives {
        debug!("[IMPORT] {id}: shape from primitives");
        return Ok(shape);
    }

    if let Some(shape) = source
        .view_box()
        .and_then(|[x, y, w, h]| Polygon::from_box(x, y, x + w, y + h).ok())
    {
        debug!("[IMPORT] {id}: shape from view box");
        return Ok(shape);
    }

    if let Some(shape) = source
        .dimensions()
        .and_then(|(w, h)| Polygon::from_box(0.0, 0.0, w, h).ok())
    {
        debug!("[IMPORT] {id}: shape from width and height");
        return Ok(shape);
    }

    if let Some(shape) = source.glyph_metrics().and_then(|gm| {
        let advance = gm.horiz_adv_x.or(gm.units_per_em)?;
        let ascent = gm.ascent?;
        let descent = gm.descent.unwrap_or(0.0);
        Polygon::from_box(0.0, descent, advance, ascent).ok()
    }) {
        debug!("[IMPORT] {id}: shape from glyph metrics");
        return Ok(shape);
    }

    Err(NestError::BoundsUndeterminable {
        document: id.to_string(),
    })
}

/// Turns source documents into [`Item`]s, once, before any packing happens.
#[derive(Clone, Debug, Copy, Default)]
pub struct Importer;

impl Importer {
    pub fn import_item(&self, id: usize, source: &impl ShapeSource) -> Result<Item> {
        let shape = extract_shape(source)?;
        let bbox = shape.bbox();
        info!(
            "[IMPORT] item {id} ({}): {} vertices, bbox {:.3} x {:.3}",
            source.identifier(),
            shape.n_vertices(),
            bbox.width(),
            bbox.height()
        );
        Ok(Item::new(id, source.identifier(), shape))
    }

    /// Imports all sources, item ids follow the input order.
    /// Stops at the first source whose shape cannot be resolved.
    pub fn import_items<S: ShapeSource>(&self, sources: &[S]) -> Result<Vec<Item>> {
        sources
            .iter()
            .enumerate()
            .map(|(id, s)| self.import_item(id, s))
            .collect()
    }
}

impl ShapeSource for SvgDocument {
    fn identifier(&self) -> &str {
        &self.id
    }

    /// `transform` attributes of an element and its ancestors are applied, except the root's:
    /// only the root's children are re-emitted in a layout.
    fn primitives(&self) -> Vec<Primitive> {
        let mut found = vec![];
        for child in self.root.child_elements() {
            collect_primitives(&self.id, child, AffineTransform::IDENTITY, &mut found);
        }
        found
    }

    fn view_box(&self) -> Option<[f64; 4]> {
        match parse_number_list(self.root.attr("viewBox")?)?.as_slice() {
            &[x, y, w, h] => Some([x, y, w, h]),
            _ => None,
        }
    }

    fn dimensions(&self) -> Option<(f64, f64)> {
        Some((self.root.num_attr("width")?, self.root.num_attr("height")?))
    }

    fn glyph_metrics(&self) -> Option<GlyphMetrics> {
        let elements = self.root.descendants();
        let font_face = elements.iter().find(|e| e.name == "font-face");
        let horiz_adv_x = elements
            .iter()
            .filter(|e| e.name == "font" || e.name == "glyph")
            .find_map(|e| e.num_attr("horiz-adv-x"));

        if font_face.is_none() && horiz_adv_x.is_none() {
            return None;
        }
        Some(GlyphMetrics {
            horiz_adv_x,
            units_per_em: font_face.and_then(|f| f.num_attr("units-per-em")),
            ascent: font_face.and_then(|f| f.num_attr("ascent")),
            descent: font_face.and_then(|f| f.num_attr("descent")),
        })
    }
}

fn collect_primitives(
    id: &str,
    e: &SvgElement,
    parent: AffineTransform,
    found: &mut Vec<Primitive>,
) {
    let m = match e.attr("transform") {
        None => parent,
        Some(list) => match AffineTransform::parse(list) {
            Some(own) => parent * own,
            None => {
                warn!("[IMPORT] {id}: ignoring malformed transform {list:?} on <{}>", e.name);
                parent
            }
        },
    };
    if let Some(prim) = primitive_of(e) {
        found.push(prim.transform(&m));
    }
    for child in e.child_elements() {
        collect_primitives(id, child, m, found);
    }
}

/// `None` for non-drawable elements and for primitives missing a required attribute.
fn primitive_of(e: &SvgElement) -> Option<Primitive> {
    let or_zero = |name: &str| e.num_attr(name).unwrap_or(0.0);
    match e.name.as_str() {
        "rect" => Some(Primitive::Rectangle {
            x: or_zero("x"),
            y: or_zero("y"),
            width: e.num_attr("width")?,
            height: e.num_attr("height")?,
        }),
        "polygon" | "polyline" => {
            let coords = parse_number_list(e.attr("points")?)?;
            if coords.len() % 2 != 0 {
                return None;
            }
            let points = coords.chunks_exact(2).map(|c| Point(c[0], c[1])).collect();
            Some(Primitive::Polygon(points))
        }
        "circle" => Some(Primitive::Circle {
            cx: or_zero("cx"),
            cy: or_zero("cy"),
            r: e.num_attr("r")?,
        }),
        "ellipse" => Some(Primitive::Ellipse {
            cx: or_zero("cx"),
            cy: or_zero("cy"),
            rx: e.num_attr("rx")?,
            ry: e.num_attr("ry")?,
        }),
        "line" => Some(Primitive::Line(
            Point(or_zero("x1"), or_zero("y1")),
            Point(or_zero("x2"), or_zero("y2")),
        )),
        "path" => {
            let points = path_points(e.attr("d")?)?;
            (!points.is_empty()).then_some(Primitive::Path(points))
        }
        _ => None,
    }
}

/// Endpoints and control points of every segment of the path data `d`.
/// `None` if `d` is malformed.
fn path_points(d: &str) -> Option<Vec<Point>> {
    let mut points = vec![];
    let mut current = Point(0.0, 0.0);
    let mut subpath_start = current;

    for (command, params) in path_commands(d)? {
        let relative = command.is_ascii_lowercase();
        // resolves the (x, y) pair relative to the start of the segment when needed
        let at = |origin: Point, x: f64, y: f64| match relative {
            true => Point(origin.0 + x, origin.1 + y),
            false => Point(x, y),
        };
        let command = command.to_ascii_uppercase();
        let arity = match command {
            'Z' => 0,
            'H' | 'V' => 1,
            'M' | 'L' | 'T' => 2,
            'Q' | 'S' => 4,
            'C' => 6,
            _ => 7,
        };
        if arity == 0 {
            if !params.is_empty() {
                return None;
            }
            current = subpath_start;
            continue;
        }
        if params.is_empty() || params.len() % arity != 0 {
            return None;
        }

        for (i, c) in params.chunks_exact(arity).enumerate() {
            let start = current;
            current = match command {
                'M' => {
                    let p = at(start, c[0], c[1]);
                    if i == 0 {
                        subpath_start = p;
                    }
                    p
                }
                'L' | 'T' => at(start, c[0], c[1]),
                'H' => Point(if relative { start.0 + c[0] } else { c[0] }, start.1),
                'V' => Point(start.0, if relative { start.1 + c[0] } else { c[0] }),
                'Q' | 'S' => {
                    points.push(at(start, c[0], c[1]));
                    at(start, c[2], c[3])
                }
                'C' => {
                    points.push(at(start, c[0], c[1]));
                    points.push(at(start, c[2], c[3]));
                    at(start, c[4], c[5])
                }
                // arcs contribute their endpoint only
                _ => at(start, c[5], c[6]),
            };
            points.push(current);
        }
    }
    Some(points)
}

/// Splits path data into its commands and their parameters.
/// Arc flags may be written without separator, e.g. `a5 5 0 1010 0`.
fn path_commands(d: &str) -> Option<Vec<(char, Vec<f64>)>> {
    let mut commands: Vec<(char, Vec<f64>)> = vec![];
    let mut rest = d;
    loop {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        let Some(c) = rest.chars().next() else {
            break;
        };
        if "MmLlHhVvCcSsQqTtAaZz".contains(c) {
            commands.push((c, vec![]));
            rest = &rest[1..];
            continue;
        }
        let (command, params) = commands.last_mut()?;
        let arc_flag = matches!(*command, 'A' | 'a') && matches!(params.len() % 7, 3 | 4);
        let len = match arc_flag {
            true => matches!(c, '0' | '1').then_some(1)?,
            false => number_len(rest)?,
        };
        params.push(rest[..len].parse().ok()?);
        rest = &rest[len..];
    }
    Some(commands)
}

/// Length of the number `s` starts with: sign, digits, fraction and exponent.
fn number_len(s: &str) -> Option<usize> {
    let digits = |b: &[u8]| b.iter().take_while(|c| c.is_ascii_digit()).count();
    let b = s.as_bytes();

    let mut i = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int_digits = digits(&b[i..]);
    i += int_digits;
    let mut frac_digits = 0;
    if b.get(i) == Some(&b'.') {
        frac_digits = digits(&b[i + 1..]);
        i += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits(&b[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    Some(i)
}
