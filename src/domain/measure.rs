//! Perimeter and area calculators for the classified shapes.

use std::collections::BTreeMap;

use crate::domain::error::{DomainError, DomainResult};

/// Calculated perimeter (L) and area (P).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub perimeter: f64,
    pub area: f64,
}

/// Named input of a calculator, e.g. `a` labeled "Основа a".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcInput {
    pub id: &'static str,
    pub label: &'static str,
}

/// Formula set for one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calculator {
    IsoscelesTrapezoid,
    Trapezoid,
    Square,
    Rectangle,
    Kite,
    Rhombus,
    Parallelogram,
}

impl Calculator {
    pub fn inputs(&self) -> &'static [CalcInput] {
        match self {
            Calculator::IsoscelesTrapezoid => &[
                CalcInput { id: "a", label: "Основа a" },
                CalcInput { id: "b", label: "Основа b" },
                CalcInput { id: "c", label: "Крак c" },
                CalcInput { id: "h", label: "Висина h" },
            ],
            Calculator::Trapezoid => &[
                CalcInput { id: "a", label: "Основа a" },
                CalcInput { id: "b", label: "Основа b" },
                CalcInput { id: "c", label: "Крак c" },
                CalcInput { id: "d", label: "Крак d" },
                CalcInput { id: "h", label: "Висина h" },
            ],
            Calculator::Square => &[CalcInput { id: "a", label: "Страна a" }],
            Calculator::Rectangle => &[
                CalcInput { id: "a", label: "Страна a" },
                CalcInput { id: "b", label: "Страна b" },
            ],
            Calculator::Kite => &[
                CalcInput { id: "a", label: "Страна a" },
                CalcInput { id: "b", label: "Страна b" },
                CalcInput { id: "d1", label: "d₁" },
                CalcInput { id: "d2", label: "d₂" },
            ],
            Calculator::Rhombus => &[
                CalcInput { id: "a", label: "Страна a" },
                CalcInput { id: "h", label: "Висина h" },
            ],
            Calculator::Parallelogram => &[
                CalcInput { id: "a", label: "Страна a" },
                CalcInput { id: "b", label: "Страна b" },
                CalcInput { id: "h", label: "Висина h" },
            ],
        }
    }

    /// Apply the formulas. Missing inputs count as zero.
    ///
    /// # Errors
    /// [`DomainError::UnknownInput`] for a value this shape does not take.
    pub fn measure(&self, values: &BTreeMap<String, f64>) -> DomainResult<Measurement> {
        let inputs = self.inputs();
        if let Some(unknown) = values.keys().find(|k| !inputs.iter().any(|i| i.id == k.as_str())) {
            return Err(DomainError::UnknownInput {
                shape: format!("{:?}", self),
                input: unknown.clone(),
            });
        }

        let v = |id: &str| values.get(id).copied().unwrap_or(0.0);
        let (a, b) = (v("a"), v("b"));

        let measurement = match self {
            Calculator::IsoscelesTrapezoid => Measurement {
                perimeter: a + b + 2.0 * v("c"),
                area: (a + b) / 2.0 * v("h"),
            },
            Calculator::Trapezoid => Measurement {
                perimeter: a + b + v("c") + v("d"),
                area: (a + b) / 2.0 * v("h"),
            },
            Calculator::Square => Measurement {
                perimeter: 4.0 * a,
                area: a.powi(2),
            },
            Calculator::Rectangle => Measurement {
                perimeter: 2.0 * (a + b),
                area: a * b,
            },
            Calculator::Kite => Measurement {
                perimeter: 2.0 * (a + b),
                area: v("d1") * v("d2") / 2.0,
            },
            Calculator::Rhombus => Measurement {
                perimeter: 4.0 * a,
                area: a * v("h"),
            },
            Calculator::Parallelogram => Measurement {
                perimeter: 2.0 * (a + b),
                area: a * v("h"),
            },
        };
        Ok(measurement)
    }
}

/// Render a result the way the calculator shows it: integers plain,
/// everything else with two decimals.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.2}", value)
    }
}
