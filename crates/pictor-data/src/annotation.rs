// Bounding-box annotation parsing
//
// Annotation files are free text. A box line carries the marker token
// `Xmin` and ends with the four box coordinates, e.g. the PennFudan form:
//
//   Bounding box for object 1 "PASpersonWalking" (Xmin, Ymin) - (Xmax, Ymax) : (160, 182) - (302, 431)
//
// The object number before the coordinates is also a digit run, so the box is
// the *last* four digit runs on the line. Lines without the marker, or with
// fewer than four digit runs, are not boxes and are dropped.

/// Token that marks a bounding-box line.
pub const BOX_MARKER: &str = "Xmin";

/// Label assigned to every parsed box (single foreground class).
pub const FOREGROUND_LABEL: i64 = 1;

/// Axis-aligned box in pixel coordinates: left, top, right, bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl BoundingBox {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    pub fn as_array(&self) -> [f32; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }
}

/// Target of an object-detection sample: one label per box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionTarget {
    pub boxes: Vec<BoundingBox>,
    pub labels: Vec<i64>,
}

impl DetectionTarget {
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Maximal runs of ASCII digits in `line`, in order of appearance.
pub fn digit_runs(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
}

/// Parse one annotation line into a box.
///
/// Returns `None` when the line lacks `marker`, has fewer than four digit
/// runs, or one of the last four runs does not fit a `u32`.
pub fn parse_box_line(line: &str, marker: &str) -> Option<BoundingBox> {
    if !line.contains(marker) {
        return None;
    }
    let runs: Vec<&str> = digit_runs(line).collect();
    if runs.len() < 4 {
        return None;
    }
    let mut coords = [0f32; 4];
    for (slot, run) in coords.iter_mut().zip(&runs[runs.len() - 4..]) {
        *slot = run.parse::<u32>().ok()? as f32;
    }
    let [xmin, ymin, xmax, ymax] = coords;
    Some(BoundingBox::new(xmin, ymin, xmax, ymax))
}

/// Parse a whole annotation file using the default [`BOX_MARKER`].
pub fn parse_annotation(text: &str) -> DetectionTarget {
    parse_annotation_with_marker(text, BOX_MARKER)
}

/// Parse every box line in `text`; each box is labelled [`FOREGROUND_LABEL`].
pub fn parse_annotation_with_marker(text: &str, marker: &str) -> DetectionTarget {
    let boxes: Vec<BoundingBox> = text
        .lines()
        .filter_map(|line| parse_box_line(line, marker))
        .collect();
    let labels = vec![FOREGROUND_LABEL; boxes.len()];
    DetectionTarget { boxes, labels }
}
