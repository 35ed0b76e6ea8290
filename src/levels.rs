//! Level templates and the built-in course
//!
//! Templates are plain data: tree layout, basket, where the disc starts and
//! the par. Runtime fields (wind, shot count, win frame) are added when a
//! template is instantiated as a `sim::Level`.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BASKET_RADIUS, DISC_RADIUS, FIELD_HEIGHT as H, FIELD_WIDTH as W, TREE_RADIUS};
use crate::error::SimResult;
use crate::sim::geom::Circle;

/// Static layout of one hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTemplate {
    pub name: String,
    #[serde(default)]
    pub trees: Vec<Circle>,
    pub basket: Circle,
    pub disc_start: Vec2,
    #[serde(default = "default_disc_radius")]
    pub disc_radius: f32,
    pub par: u32,
}

fn default_disc_radius() -> f32 {
    DISC_RADIUS
}

impl LevelTemplate {
    fn new(name: &str, trees: Vec<Circle>, basket: Vec2, disc_start: Vec2, par: u32) -> Self {
        Self {
            name: name.to_string(),
            trees,
            basket: Circle::new(basket, BASKET_RADIUS),
            disc_start,
            disc_radius: DISC_RADIUS,
            par,
        }
    }
}

fn tree(x: f32, y: f32) -> Circle {
    Circle::new(Vec2::new(x, y), TREE_RADIUS)
}

/// Parse a course from JSON (an array of templates)
pub fn from_json(json: &str) -> SimResult<Vec<LevelTemplate>> {
    Ok(serde_json::from_str(json)?)
}

/// Fence the field with trees along all four edges
pub fn with_border_trees(mut template: LevelTemplate) -> LevelTemplate {
    const ACROSS: usize = 10;
    const DOWN: usize = 20;

    let top = (0..ACROSS).map(|i| tree(i as f32 / ACROSS as f32 * W + 20.0, 0.0));
    let left = (0..DOWN).map(|i| tree(10.0, i as f32 / DOWN as f32 * H));
    let right = (0..DOWN).map(|i| tree(W - 10.0, i as f32 / DOWN as f32 * H));
    let bottom = (0..ACROSS).map(|i| tree(i as f32 / ACROSS as f32 * W + 20.0, H - 10.0));

    template.trees.extend(top.chain(left).chain(right).chain(bottom));
    template
}

/// The full course, in play order
pub fn builtin() -> Vec<LevelTemplate> {
    vec![
        the_woods(),
        the_woods_two(),
        tight_trees(),
        penta_tree(),
        wavy_woods(),
        bounce(),
        bounce_two(),
        spiral(),
        long_shot(),
    ]
}

fn the_woods() -> LevelTemplate {
    LevelTemplate::new(
        "The Woods",
        vec![tree(W / 2.0, H / 2.0)],
        Vec2::new(W / 2.0, 50.0),
        Vec2::new(W / 2.0, H - 50.0),
        2,
    )
}

fn the_woods_two() -> LevelTemplate {
    LevelTemplate::new(
        "The Woods 2: Electric Bogaloo",
        vec![tree(W / 2.0 - 10.0, H / 2.0), tree(W / 2.0 + 10.0, H / 2.0)],
        Vec2::new(W / 2.0, 50.0),
        Vec2::new(W / 2.0, H - 50.0),
        3,
    )
}

fn tight_trees() -> LevelTemplate {
    let column = |x: f32| (0..10).map(move |i| tree(x, H / 4.0 + i as f32 * 50.0));
    LevelTemplate::new(
        "Tight Trees",
        column(W / 2.0 - 100.0).chain(column(W / 2.0 + 80.0)).collect(),
        Vec2::new(W / 2.0 + 50.0, 100.0),
        Vec2::new(W / 2.0, H - 50.0),
        3,
    )
}

fn penta_tree() -> LevelTemplate {
    LevelTemplate::new(
        "Penta Tree",
        vec![
            tree(W - 70.0, H - 150.0),
            tree(W - 70.0, 150.0),
            tree(W / 2.0, H / 2.0),
            tree(70.0, H - 150.0),
            tree(70.0, 150.0),
        ],
        Vec2::new(W - 40.0, 70.0),
        Vec2::new(40.0, H - 50.0),
        3,
    )
}

fn wavy_woods() -> LevelTemplate {
    let curve = (0..10).map(|i| {
        let i = i as f32;
        tree(W / 2.0 - 20.0 + 3.0 * i * i, H / 4.0 + i * 50.0)
    });
    LevelTemplate::new(
        "Wavy Woods",
        curve.collect(),
        Vec2::new(W / 2.0, 80.0),
        Vec2::new(W / 2.0 + 50.0, H - 80.0),
        4,
    )
}

fn bounce() -> LevelTemplate {
    let mut trees: Vec<Circle> = (0..5)
        .map(|i| tree(W / 2.0, H / 4.0 + 250.0 + i as f32 * 50.0))
        .collect();
    trees.push(Circle::new(Vec2::new(W / 2.0, 230.0), 40.0));
    LevelTemplate::new(
        "Bounce",
        trees,
        Vec2::new(W * 0.8, H * 0.75),
        Vec2::new(W * 0.2, H * 0.75),
        3,
    )
}

fn bounce_two() -> LevelTemplate {
    let mut trees: Vec<Circle> = (0..7)
        .map(|i| tree(W * 0.3, H / 4.0 + 150.0 + i as f32 * 50.0))
        .collect();
    trees.extend(
        [(300.0, 300.0), (245.0, 250.0), (210.0, 310.0)]
            .into_iter()
            .map(|(x, y)| Circle::new(Vec2::new(x, y), 10.0)),
    );
    trees.push(Circle::new(Vec2::new(20.0, 200.0), 35.0));
    trees.push(Circle::new(Vec2::new(W / 2.0, 40.0), 35.0));
    LevelTemplate::new(
        "Bounce 2",
        trees,
        Vec2::new(W * 0.8, H * 0.75),
        Vec2::new(W * 0.1, H * 0.75),
        4,
    )
}

fn spiral() -> LevelTemplate {
    let trees = (0..10)
        .map(|i| {
            let i = i as f32;
            let angle = TAU * i / 10.0;
            let r = 60.0 + 120.0 * i / 10.0;
            tree(angle.cos() * r + W / 2.0, angle.sin() * r + H / 2.0)
        })
        .collect();
    LevelTemplate::new(
        "Spiral",
        trees,
        Vec2::new(W / 2.0, H / 2.0),
        Vec2::new(30.0, H - 30.0),
        3,
    )
}

fn long_shot() -> LevelTemplate {
    LevelTemplate::new(
        "Long Shot",
        vec![tree(60.0, 60.0), tree(W - 30.0, H - 30.0)],
        Vec2::new(W - 40.0, 80.0),
        Vec2::new(40.0, H - 80.0),
        1,
    )
}
