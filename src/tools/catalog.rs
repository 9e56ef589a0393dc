//! Static lookup data for the study tools: known physics websites and
//! exam formula sheets.

/// A known physics website, addressed by its lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub key: &'static str,
    pub url: &'static str,
}

/// Formula sheet content for one exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaSheet {
    pub exam: &'static str,
    pub content: &'static str,
}

/// Written when an exam type has no sheet.
pub const GENERIC_FORMULA_SHEET: &str = "Formula sheet for general physics topics";

pub const PHYSICS_SITES: &[Site] = &[
    Site {
        key: "khan_academy",
        url: "https://www.khanacademy.org/science/physics",
    },
    Site {
        key: "physics_classroom",
        url: "https://www.physicsclassroom.com/",
    },
    Site {
        key: "hyperphysics",
        url: "http://hyperphysics.phy-astr.gsu.edu/hbase/hframe.html",
    },
    Site {
        key: "physics_world",
        url: "https://physicsworld.com/",
    },
    Site {
        key: "mit_physics",
        url: "https://web.mit.edu/physics/",
    },
    Site {
        key: "feynman_lectures",
        url: "https://www.feynmanlectures.caltech.edu/",
    },
    Site {
        key: "physics_forums",
        url: "https://www.physicsforums.com/",
    },
    Site {
        key: "wolfram_physics",
        url: "https://www.wolframalpha.com/examples/science-and-technology/physics",
    },
    Site {
        key: "nist",
        url: "https://www.nist.gov/pml/physics-laboratory",
    },
    Site {
        key: "physics_today",
        url: "https://physicstoday.scitation.org/",
    },
];

const MDCAT_SHEET: &str = "
🎯 MDCAT PHYSICS FORMULAS

📐 MECHANICS:
• v = u + at
• s = ut + ½at²
• v² = u² + 2as
• F = ma
• p = mv (momentum)
• KE = ½mv²
• PE = mgh

⚡ ELECTRICITY:
• V = IR (Ohm's Law)
• P = VI = I²R = V²/R
• Q = It
• C = Q/V (Capacitance)

🌊 WAVES:
• v = fλ
• f = 1/T
• n = sin i / sin r

🔥 THERMODYNAMICS:
• PV = nRT
• Q = mcΔT
• η = W/Q × 100%
";

const NEET_SHEET: &str = "
🎯 NEET PHYSICS FORMULAS

📐 MECHANICS:
• v = u + at
• s = ut + ½at²
• F = ma
• τ = Iα (Torque)
• L = Iω (Angular momentum)
• g = GM/R²

⚡ ELECTRICITY & MAGNETISM:
• F = qE
• B = μ₀I/2πr
• ε = -dΦ/dt (Faraday's Law)
• F = qvB sin θ

🌊 OPTICS:
• 1/f = 1/u + 1/v
• m = v/u = h'/h
• μ = c/v

☢️ MODERN PHYSICS:
• E = hf
• λ = h/p (de Broglie)
• E = mc²
";

const JEE_SHEET: &str = "
🎯 JEE PHYSICS FORMULAS

📐 MECHANICS:
• v = u + at
• F = dp/dt
• τ = r × F
• I = Σmr²
• ω = v/r
• α = a/r

⚡ ELECTRICITY & MAGNETISM:
• ∮E⃗·dA⃗ = Q/ε₀ (Gauss Law)
• ∮B⃗·dl⃗ = μ₀I (Ampere's Law)
• ε = -dΦ/dt
• F⃗ = q(E⃗ + v⃗ × B⃗)

🌊 WAVES & OSCILLATIONS:
• x = A sin(ωt + φ)
• T = 2π√(l/g)
• v = √(T/μ)
• I ∝ A²

☢️ MODERN PHYSICS:
• E = hf = hc/λ
• p = h/λ
• ΔE = Δmc²
• R = 1.097 × 10⁷ m⁻¹
";

pub const FORMULA_SHEETS: &[FormulaSheet] = &[
    FormulaSheet {
        exam: "MDCAT",
        content: MDCAT_SHEET,
    },
    FormulaSheet {
        exam: "NEET",
        content: NEET_SHEET,
    },
    FormulaSheet {
        exam: "JEE",
        content: JEE_SHEET,
    },
];

/// Lookup tables used by the study tools. Swap the slices to localize or
/// extend the catalog without touching tool code.
#[derive(Debug, Clone, Copy)]
pub struct StudyCatalog {
    pub sites: &'static [Site],
    pub formula_sheets: &'static [FormulaSheet],
    pub generic_formula_sheet: &'static str,
}

impl Default for StudyCatalog {
    fn default() -> Self {
        Self {
            sites: PHYSICS_SITES,
            formula_sheets: FORMULA_SHEETS,
            generic_formula_sheet: GENERIC_FORMULA_SHEET,
        }
    }
}

impl StudyCatalog {
    /// Find a site by user-supplied name: lowercased, spaces become `_`.
    pub fn site(&self, site_type: &str) -> Option<&Site> {
        let key = site_key(site_type);
        self.sites.iter().find(|s| s.key == key)
    }

    /// Site keys rendered for people, e.g. `Khan Academy`.
    pub fn site_display_names(&self) -> Vec<String> {
        self.sites
            .iter()
            .map(|s| title_case(&s.key.replace('_', " ")))
            .collect()
    }

    /// Sheet content for an exam (case-insensitive), or the generic placeholder.
    pub fn formula_sheet(&self, exam_type: &str) -> &'static str {
        let exam = exam_type.to_uppercase();
        self.formula_sheets
            .iter()
            .find(|s| s.exam == exam)
            .map(|s| s.content)
            .unwrap_or(self.generic_formula_sheet)
    }
}

pub fn site_key(site_type: &str) -> String {
    site_type.to_lowercase().replace(' ', "_")
}

/// Uppercase the first letter of each word and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
