//! Equations sidebar UI for the oscillators
//!
//! Lists the formulas the engine actually evaluates, using egui.

use egui::{Color32, Context, RichText};

/// An equation with its name and formula
pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

/// Draw the equations sidebar
pub fn draw_equations_sidebar(
    ctx: &Context,
    title: &str,
    equations: &[Equation],
    variables: &[(&str, &str)],
) {
    egui::SidePanel::right("equations_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading(RichText::new(title).color(Color32::LIGHT_BLUE));
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.collapsing(RichText::new("Equations").strong(), |ui| {
                    for eq in equations {
                        ui.group(|ui| {
                            ui.label(RichText::new(eq.name).strong().color(Color32::YELLOW));
                            ui.label(RichText::new(eq.formula).monospace().color(Color32::WHITE));
                            ui.label(RichText::new(eq.description).small().italics());
                        });
                        ui.add_space(4.0);
                    }
                });

                ui.add_space(8.0);

                ui.collapsing(RichText::new("Variables").strong(), |ui| {
                    egui::Grid::new("variables_grid")
                        .num_columns(2)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            for (symbol, meaning) in variables {
                                ui.label(RichText::new(*symbol).monospace().color(Color32::LIGHT_GREEN));
                                ui.label(*meaning);
                                ui.end_row();
                            }
                        });
                });
            });
        });
}

// ============================================================================
// Gravity Pendulum
// ============================================================================

pub const PENDULUM_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Angular Acceleration",
        formula: "α = −(g/L)·sin θ",
        description: "Restoring torque per unit inertia",
    },
    Equation {
        name: "Air Friction",
        formula: "α −= 0.02·ω",
        description: "Linear damping when friction is on",
    },
    Equation {
        name: "Height",
        formula: "h = L·(1 − cos θ)",
        description: "Rise above the lowest point",
    },
    Equation {
        name: "Energy",
        formula: "Eₚ = m·g·h,  Eₖ = ½·m·(ω·L)²",
        description: "Potential and kinetic energy",
    },
    Equation {
        name: "Small-Angle Period",
        formula: "T = 2π·√(L/g)",
        description: "Used when |θ₀| ≤ 20°",
    },
    Equation {
        name: "Large-Angle Period",
        formula: "T = 2π·√(L/g)·(1 + θ₀²/16 + 11θ₀⁴/3072)",
        description: "Series correction above 20°",
    },
];

pub const PENDULUM_VARIABLES: &[(&str, &str)] = &[
    ("θ, θ₀", "Angle, angle at start"),
    ("ω", "Angular velocity"),
    ("L", "Rod length"),
    ("g", "Gravitational acceleration (9.81)"),
    ("m", "Bob mass"),
    ("h", "Height of the bob"),
    ("T", "Period"),
];

// ============================================================================
// Spring Oscillator
// ============================================================================

pub const SPRING_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Hooke's Law",
        formula: "F = −k·x",
        description: "Restoring force about equilibrium",
    },
    Equation {
        name: "Air Friction",
        formula: "F −= 0.1·v",
        description: "Linear damping when friction is on",
    },
    Equation {
        name: "Equilibrium Length",
        formula: "ℓ₀ = ℓc + m·g/k",
        description: "Where the spring comes to rest",
    },
    Equation {
        name: "Energy",
        formula: "Eₚ = ½·k·x²,  Eₖ = ½·m·v²",
        description: "Elastic and kinetic energy",
    },
    Equation {
        name: "Period",
        formula: "T = 2π·√(m/k)",
        description: "Independent of amplitude",
    },
];

pub const SPRING_VARIABLES: &[(&str, &str)] = &[
    ("x", "Displacement from equilibrium"),
    ("v", "Velocity"),
    ("k", "Spring constant"),
    ("m", "Mass"),
    ("ℓc", "Compressed length (200)"),
    ("ℓ₀", "Equilibrium length"),
    ("T", "Period"),
];
