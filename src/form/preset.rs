use clap::ValueEnum;

/// Known control layouts for the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// No predeclared controls; only fields given explicitly.
    #[default]
    Custom,
    /// Clinical features expected by the sepsis prediction service.
    Sepsis,
}

const SEPSIS_FIELDS: &[&str] = &["PRG", "PL", "BP", "SK", "TS", "BMI", "BD2", "Age"];

impl Preset {
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Preset::Custom => &[],
            Preset::Sepsis => SEPSIS_FIELDS,
        }
    }

    pub fn describe(self, name: &str) -> Option<&'static str> {
        match (self, name) {
            (Preset::Sepsis, "PRG") => Some("plasma glucose"),
            (Preset::Sepsis, "PL") => Some("blood work result 1 (mu U/ml)"),
            (Preset::Sepsis, "BP") => Some("blood pressure (mmHg)"),
            (Preset::Sepsis, "SK") => Some("blood work result 2 (mm)"),
            (Preset::Sepsis, "TS") => Some("blood work result 3 (mu U/ml)"),
            (Preset::Sepsis, "BMI") => Some("body mass index"),
            (Preset::Sepsis, "BD2") => Some("blood work result 4 (mu U/ml)"),
            (Preset::Sepsis, "Age") => Some("age in years"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sepsis_fields_described() {
        for name in Preset::Sepsis.fields() {
            assert!(Preset::Sepsis.describe(name).is_some(), "{} undocumented", name);
        }
        assert!(Preset::Custom.fields().is_empty());
    }
}
