//! Built-in color functions
//!
//! Every function has a fixed positional signature. The parser uses the
//! signature to type each argument; the baker calls [`ThemeFunction::evaluate`]
//! once every `Identifier` argument has been replaced by its resolved color.

use flipdef_core::Color;
use std::fmt;

use crate::definition::EntryRef;

/// Declared type of a function parameter
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ArgType {
    /// Integer in 0..=255
    U8,
    /// Signed 32-bit integer
    I32,
    /// Finite real number
    R32,
    /// Color literal, or the name of another entry resolved at bake time
    Color,
    /// Name of another entry, resolved to its color at bake time
    Identifier,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArgType::U8 => "an integer in 0..=255",
            ArgType::I32 => "an integer",
            ArgType::R32 => "a number",
            ArgType::Color => "a color or entry name",
            ArgType::Identifier => "an entry name",
        })
    }
}

/// A typed function argument
#[derive(Clone, Debug, PartialEq)]
pub enum FuncArg {
    U8(u8),
    I32(i32),
    R32(f32),
    Color(Color),
    /// Deferred until bake time
    Identifier(EntryRef),
}

impl FuncArg {
    /// Whether this argument may fill a parameter declared as `ty`.
    ///
    /// `Identifier` is accepted for `Color` parameters; reals must be finite.
    pub fn fits(&self, ty: ArgType) -> bool {
        match (self, ty) {
            (FuncArg::U8(_), ArgType::U8) | (FuncArg::I32(_), ArgType::I32) => true,
            (FuncArg::R32(v), ArgType::R32) => v.is_finite(),
            (FuncArg::Color(_), ArgType::Color) => true,
            (FuncArg::Identifier(_), ArgType::Color | ArgType::Identifier) => true,
            _ => false,
        }
    }

    fn color(&self) -> Color {
        debug_assert!(matches!(self, FuncArg::Color(_)), "expected color, got {self:?}");
        match self {
            FuncArg::Color(c) => *c,
            _ => Color::TRANSPARENT,
        }
    }

    fn real(&self) -> f32 {
        debug_assert!(matches!(self, FuncArg::R32(_)), "expected real, got {self:?}");
        match self {
            FuncArg::R32(v) => *v,
            _ => 0.0,
        }
    }

    fn byte(&self) -> u8 {
        debug_assert!(matches!(self, FuncArg::U8(_)), "expected u8, got {self:?}");
        match self {
            FuncArg::U8(v) => *v,
            _ => 0,
        }
    }

    fn int(&self) -> i32 {
        debug_assert!(matches!(self, FuncArg::I32(_)), "expected i32, got {self:?}");
        match self {
            FuncArg::I32(v) => *v,
            _ => 0,
        }
    }
}

/// Function catalog keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ThemeFunction {
    /// `Mix(a, b, t)`: per-channel `a * (1 - t) + b * t`
    Mix,
    /// `Opacity(c, alpha)`: replace alpha with a 0..=1 value
    Opacity,
    /// `Alpha(c, alpha)`: replace alpha with a 0..=255 value
    Alpha,
    /// `Darken(c, amount)`: subtract `amount` from each RGB channel
    Darken,
    /// `Lighten(c, amount)`: add `amount` to each RGB channel
    Lighten,
    /// `Shade(c, steps)`: shift each RGB channel by `steps / 255`
    Shade,
    /// `Contrast(bg, light, dark)`: `light` on dark backgrounds, else `dark`
    Contrast,
}

struct FunctionDef {
    name: &'static str,
    params: &'static [ArgType],
    eval: fn(&[FuncArg]) -> Color,
}

fn mix(a: &[FuncArg]) -> Color {
    Color::lerp(&a[0].color(), &a[1].color(), a[2].real())
}

fn opacity(a: &[FuncArg]) -> Color {
    a[0].color().with_alpha(a[1].real())
}

fn alpha(a: &[FuncArg]) -> Color {
    a[0].color().with_alpha(a[1].byte() as f32 / 255.0)
}

fn darken(a: &[FuncArg]) -> Color {
    a[0].color().darken(a[1].real())
}

fn lighten(a: &[FuncArg]) -> Color {
    a[0].color().lighten(a[1].real())
}

fn shade(a: &[FuncArg]) -> Color {
    a[0].color().lighten(a[1].int() as f32 / 255.0)
}

fn contrast(a: &[FuncArg]) -> Color {
    if a[0].color().luminance() < 0.5 {
        a[1].color()
    } else {
        a[2].color()
    }
}

use ArgType::{Color as C, Identifier as Id, R32, I32, U8};

// Indexed by `ThemeFunction as usize`.
static CATALOG: [FunctionDef; 7] = [
    FunctionDef { name: "Mix", params: &[C, C, R32], eval: mix },
    FunctionDef { name: "Opacity", params: &[C, R32], eval: opacity },
    FunctionDef { name: "Alpha", params: &[C, U8], eval: alpha },
    FunctionDef { name: "Darken", params: &[C, R32], eval: darken },
    FunctionDef { name: "Lighten", params: &[C, R32], eval: lighten },
    FunctionDef { name: "Shade", params: &[C, I32], eval: shade },
    FunctionDef { name: "Contrast", params: &[Id, C, C], eval: contrast },
];

impl ThemeFunction {
    pub const ALL: [ThemeFunction; 7] = [
        ThemeFunction::Mix,
        ThemeFunction::Opacity,
        ThemeFunction::Alpha,
        ThemeFunction::Darken,
        ThemeFunction::Lighten,
        ThemeFunction::Shade,
        ThemeFunction::Contrast,
    ];

    fn def(self) -> &'static FunctionDef {
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Declared positional parameter types
    pub fn params(self) -> &'static [ArgType] {
        self.def().params
    }

    pub fn arity(self) -> usize {
        self.params().len()
    }

    /// 1-based position of the first argument that does not fit its parameter
    pub fn mismatch(self, args: &[FuncArg]) -> Option<usize> {
        args.iter()
            .zip(self.params())
            .position(|(arg, &ty)| !arg.fits(ty))
            .map(|i| i + 1)
    }

    /// Evaluate with fully concrete arguments.
    ///
    /// `Identifier` parameters must already have been replaced by
    /// `FuncArg::Color`; the parser and baker guarantee arity and types.
    pub fn evaluate(self, args: &[FuncArg]) -> Color {
        debug_assert_eq!(args.len(), self.arity(), "{} arity", self.name());
        if args.len() != self.arity() {
            return Color::TRANSPARENT;
        }
        (self.def().eval)(args)
    }
}

impl fmt::Display for ThemeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
