use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub height: u32,
}

impl Board {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One line of user input: `quantity` identical parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRequest {
    pub name: String,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub height: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub quantity: u32,
}

/// Expands every request into one unit-quantity [`Detail`] per physical
/// piece, keeping request order.
pub fn expand(requests: &[DetailRequest]) -> Vec<Detail> {
    let mut details = Vec::new();
    for r in requests {
        for _ in 0..r.quantity {
            details.push(Detail::new(r.name.clone(), r.width, r.height));
        }
    }
    details
}

/// A single physical part. Width and height are stored as entered;
/// orientation is chosen by the caller through the `*_for` accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub quantity: u32,
}

impl Detail {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            quantity: 1,
        }
    }

    pub fn width_for(&self, rotated: bool) -> u32 {
        if rotated { self.height } else { self.width }
    }

    pub fn height_for(&self, rotated: bool) -> u32 {
        if rotated { self.width } else { self.height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn fits_in(&self, board: &Board) -> bool {
        let fits = |rotated| {
            self.width_for(rotated) <= board.width && self.height_for(rotated) <= board.height
        };
        fits(false) || fits(true)
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}x{}", self.name, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub detail: Detail,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
}

impl Placement {
    pub fn width(&self) -> u32 {
        self.detail.width_for(self.rotated)
    }

    pub fn height(&self) -> u32 {
        self.detail.height_for(self.rotated)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn overlaps(&self, other: &Placement) -> bool {
        self.x < other.x + other.width()
            && other.x < self.x + self.width()
            && self.y < other.y + other.height()
            && other.y < self.y + self.height()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub board: Board,
    pub placements: Vec<Placement>,
}

impl Solution {
    pub fn used_area(&self) -> u64 {
        self.placements.iter().map(|p| p.area()).sum()
    }

    pub fn utilization_percent(&self) -> f64 {
        let board_area = self.board.area();
        if board_area == 0 {
            return 0.0;
        }
        self.used_area() as f64 * 100.0 / board_area as f64
    }

    pub fn waste_area(&self) -> u64 {
        self.board.area().saturating_sub(self.used_area())
    }
}

/// Result of one search run.
///
/// `Exhausted` means every arrangement reachable by the search was tried;
/// `TimedOut` means the deadline hit first and nothing is proven.
#[derive(Debug, Clone)]
pub enum Outcome {
    Solved(Solution),
    Exhausted,
    TimedOut,
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(s) => Some(s),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Solved(_) => "solved",
            Outcome::Exhausted => "exhausted",
            Outcome::TimedOut => "timed_out",
        }
    }
}

/// Accepts JSON integers as well as integral floats such as `600.0`.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(serde::de::Error::custom);
    }
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_one_detail_per_unit() {
        let requests = vec![
            DetailRequest {
                name: "shelf".into(),
                width: 600,
                height: 300,
                quantity: 3,
            },
            DetailRequest {
                name: "door".into(),
                width: 1800,
                height: 600,
                quantity: 1,
            },
        ];
        let details = expand(&requests);
        assert_eq!(details.len(), 4);
        assert!(details[..3].iter().all(|d| d.name == "shelf"));
        assert_eq!(details[3].name, "door");
        assert!(details.iter().all(|d| d.quantity == 1));
    }

    #[test]
    fn test_oriented_accessors() {
        let d = Detail::new("A", 6, 4);
        assert_eq!((d.width_for(false), d.height_for(false)), (6, 4));
        assert_eq!((d.width_for(true), d.height_for(true)), (4, 6));
        assert!(!d.is_square());
        assert!(Detail::new("B", 3, 3).is_square());
    }

    #[test]
    fn test_fits_in_considers_rotation() {
        let board = Board::new(100, 50);
        assert!(Detail::new("A", 50, 100).fits_in(&board));
        assert!(!Detail::new("B", 120, 10).fits_in(&board));
        assert!(!Detail::new("C", 60, 60).fits_in(&board));
    }

    #[test]
    fn test_placement_overlap() {
        let a = Placement {
            detail: Detail::new("A", 6, 4),
            x: 0,
            y: 0,
            rotated: false,
        };
        let touching = Placement {
            detail: Detail::new("B", 4, 6),
            x: 0,
            y: 4,
            rotated: false,
        };
        let crossing = Placement {
            detail: Detail::new("C", 4, 6),
            x: 5,
            y: 0,
            rotated: true,
        };
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert_eq!((crossing.width(), crossing.height()), (6, 4));
    }

    #[test]
    fn test_solution_report() {
        let sol = Solution {
            board: Board::new(10, 10),
            placements: vec![
                Placement {
                    detail: Detail::new("A", 6, 4),
                    x: 0,
                    y: 0,
                    rotated: false,
                },
                Placement {
                    detail: Detail::new("B", 4, 6),
                    x: 0,
                    y: 4,
                    rotated: false,
                },
            ],
        };
        assert_eq!(sol.used_area(), 48);
        assert_eq!(sol.waste_area(), 52);
        assert!((sol.utilization_percent() - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_utilization_zero_area_board() {
        let sol = Solution {
            board: Board::new(0, 10),
            placements: vec![],
        };
        assert_eq!(sol.utilization_percent(), 0.0);
    }

    #[test]
    fn test_deserialize_integral_float() {
        let req: DetailRequest = serde_json::from_str(
            r#"{"name": "A", "width": 600.0, "height": 300, "quantity": 2}"#,
        )
        .unwrap();
        assert_eq!(req.width, 600);
        assert!(
            serde_json::from_str::<Board>(r#"{"width": 1.5, "height": 2}"#).is_err()
        );
        assert!(
            serde_json::from_str::<Board>(r#"{"width": -3, "height": 2}"#).is_err()
        );
    }
}
