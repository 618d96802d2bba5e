//! Ball set and rack layout.

use lina::Point2;

/// Ball type: solid (1-8) or striped (9-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallType {
    Cue,
    Solid,
    Striped,
}

/// One ball of the set.
#[derive(Debug, Clone, Copy)]
pub struct BallDef {
    pub number: u8,
    pub ball_type: BallType,
}

impl BallDef {
    const fn new(number: u8, ball_type: BallType) -> Self {
        Self { number, ball_type }
    }
}

/// All 16 balls (cue + 15 numbered)
pub const BALLS: [BallDef; 16] = [
    BallDef::new(0, BallType::Cue),
    BallDef::new(1, BallType::Solid),
    BallDef::new(2, BallType::Solid),
    BallDef::new(3, BallType::Solid),
    BallDef::new(4, BallType::Solid),
    BallDef::new(5, BallType::Solid),
    BallDef::new(6, BallType::Solid),
    BallDef::new(7, BallType::Solid),
    BallDef::new(8, BallType::Solid),
    BallDef::new(9, BallType::Striped),
    BallDef::new(10, BallType::Striped),
    BallDef::new(11, BallType::Striped),
    BallDef::new(12, BallType::Striped),
    BallDef::new(13, BallType::Striped),
    BallDef::new(14, BallType::Striped),
    BallDef::new(15, BallType::Striped),
];

/// Standard 8-ball triangle rack. Index `n - 1` holds ball `n`.
/// The apex points left toward the cue ball, rows spread right.
///
/// ```text
///  1
///  9   2
///  3   8  10
/// 11  4  5  12
///  6 13 14  7 15
/// ```
pub fn rack_positions(apex: Point2, ball_radius: f64) -> [Point2; 15] {
    // One unit of slack between neighbours
    let gap = ball_radius * 2.0 + 1.0;
    let row_offset = gap * 3f64.sqrt() / 2.0;

    let layout: [(u8, usize, f64); 15] = [
        (1, 0, 0.0),
        (9, 1, -0.5), (2, 1, 0.5),
        (3, 2, -1.0), (8, 2, 0.0), (10, 2, 1.0),
        (11, 3, -1.5), (4, 3, -0.5), (5, 3, 0.5), (12, 3, 1.5),
        (6, 4, -2.0), (13, 4, -1.0), (14, 4, 0.0), (7, 4, 1.0), (15, 4, 2.0),
    ];

    let mut positions = [Point2::ORIGIN; 15];
    for (ball_num, row, v_offset) in layout {
        positions[(ball_num - 1) as usize] = Point2::new(
            apex.x + row as f64 * row_offset,
            apex.y + v_offset * gap,
        );
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rack_has_no_touching_balls() {
        let r = 12.0;
        let rack = rack_positions(Point2::new(700.0, 250.0), r);
        for i in 0..rack.len() {
            for j in (i + 1)..rack.len() {
                let d = rack[i].distance_to(rack[j]);
                assert!(d >= 2.0 * r + 1.0 - 1e-9, "balls {} and {} at {}", i + 1, j + 1, d);
            }
        }
        assert_eq!(rack[0], Point2::new(700.0, 250.0));
    }

    #[test]
    fn numbers_match_types() {
        for (i, ball) in BALLS.iter().enumerate() {
            assert_eq!(ball.number as usize, i);
            let expected = match i {
                0 => BallType::Cue,
                1..=8 => BallType::Solid,
                _ => BallType::Striped,
            };
            assert_eq!(ball.ball_type, expected);
        }
    }
}
