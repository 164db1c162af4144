//! Falling snow (or petals) over the current panel

use crate::layout::Pos;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunEffect {
    #[default]
    Off,
    Snow,
    Sakura,
}

impl FunEffect {
    pub fn cycle(self) -> Self {
        match self {
            FunEffect::Off => FunEffect::Snow,
            FunEffect::Snow => FunEffect::Sakura,
            FunEffect::Sakura => FunEffect::Off,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            FunEffect::Sakura => "*",
            _ => ".",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flake {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Default)]
pub struct Fun {
    pub effect: FunEffect,
    pub flakes: Vec<Flake>,
    /// Panel the flakes fall in; a different one starts over
    area: Pos,
}

impl Fun {
    pub fn is_on(&self) -> bool {
        self.effect != FunEffect::Off
    }

    pub fn cycle(&mut self) {
        self.effect = self.effect.cycle();
        self.flakes.clear();
    }

    /// Advance one frame inside `area`
    pub fn tick<R: Rng + ?Sized>(&mut self, area: Pos, rng: &mut R) {
        if !self.is_on() {
            return;
        }
        if area != self.area {
            self.area = area;
            self.flakes.clear();
        }
        if area.w < 3 || area.h < 3 {
            return;
        }
        for flake in &mut self.flakes {
            flake.x += rng.random_range(-1..=1);
            flake.y += 1;
        }
        self.flakes
            .retain(|f| f.x > area.x && f.x < area.right() && f.y < area.bottom());
        let born = rng.random_range(0..4);
        for _ in 0..born {
            let x = rng.random_range(area.x + 1..area.right());
            self.flakes.push(Flake { x, y: area.y + 1 });
        }
    }
}
