//! Obligation resolver
//!
//! Static mapping from classification label to the ordered compliance
//! obligations for that tier. Compiled in; not part of the rule
//! configuration. Classifications without an entry resolve to no
//! obligations, which the rule table lint reports at load time.

use std::collections::BTreeMap;

/// High-risk tier
pub const HIGH: &str = "alto";
/// Limited-risk tier (transparency obligations)
pub const LIMITED: &str = "limitado";
/// Minimal-risk tier
pub const MINIMAL: &str = "minimo";

const HIGH_OBLIGATIONS: &[&str] = &[
    "Realizar la evaluación de conformidad completa según el Anexo VI.",
    "Registrar el sistema en la base de datos de la UE antes de su puesta en el mercado.",
    "Implementar un sistema continuo de gestión de riesgos.",
    "Garantizar la gobernanza de los datos y su calidad durante entrenamiento y prueba.",
    "Asegurar niveles adecuados de supervisión humana y ciberseguridad.",
];

const LIMITED_OBLIGATIONS: &[&str] = &[
    "Informar claramente a los usuarios cuando interactúan con un sistema de IA.",
    "Etiquetar de forma visible el contenido generado o manipulado mediante IA.",
    "Revisar periódicamente si los casos de uso evolucionan hacia categorías de mayor riesgo.",
];

const MINIMAL_OBLIGATIONS: &[&str] = &[
    "Adherirse voluntariamente a códigos de conducta para fomentar la confianza.",
    "Monitorizar el uso para detectar riesgos emergentes no contemplados inicialmente.",
    "No se requieren acciones obligatorias de cumplimiento.",
];

/// Classification -> ordered obligations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObligationTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl ObligationTable {
    /// The table shipped with the engine
    pub fn builtin() -> Self {
        let entries = [
            (HIGH, HIGH_OBLIGATIONS),
            (LIMITED, LIMITED_OBLIGATIONS),
            (MINIMAL, MINIMAL_OBLIGATIONS),
        ]
        .into_iter()
        .map(|(label, items)| {
            (
                label.to_string(),
                items.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            )
        })
        .collect();
        Self { entries }
    }

    /// An empty table
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces the obligations for `classification`, builder style
    pub fn with_entry<I, S>(mut self, classification: impl Into<String>, obligations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            classification.into(),
            obligations.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Returns the obligations for `classification`, empty when unknown
    pub fn obligations_for(&self, classification: &str) -> Vec<String> {
        self.entries
            .get(classification)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns true if `classification` has an entry (possibly empty)
    pub fn has_entry(&self, classification: &str) -> bool {
        self.entries.contains_key(classification)
    }

    /// Classification labels with an entry, sorted
    pub fn classifications(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for ObligationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Looks up `classification` in the built-in table
pub fn obligations_for(classification: &str) -> Vec<String> {
    ObligationTable::builtin().obligations_for(classification)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_counts() {
        assert_eq!(obligations_for(HIGH).len(), 5);
        assert_eq!(obligations_for(LIMITED).len(), 3);
        assert_eq!(obligations_for(MINIMAL).len(), 3);
    }

    #[test]
    fn test_order_preserved() {
        let high = obligations_for(HIGH);
        assert!(high[0].starts_with("Realizar la evaluación de conformidad"));
        assert!(high[4].starts_with("Asegurar niveles adecuados"));
    }

    #[test]
    fn test_unknown_classification_is_empty() {
        assert!(obligations_for("inaceptable").is_empty());
        assert!(obligations_for("").is_empty());
        // Lookup is case-sensitive
        assert!(obligations_for("Alto").is_empty());
    }

    #[test]
    fn test_custom_entry() {
        let table = ObligationTable::empty().with_entry("inaceptable", ["Prohibido."]);
        assert!(table.has_entry("inaceptable"));
        assert_eq!(table.obligations_for("inaceptable"), vec!["Prohibido.".to_string()]);
        assert!(!table.has_entry(HIGH));
    }

    #[test]
    fn test_classifications_sorted() {
        let table = ObligationTable::builtin();
        let labels: Vec<_> = table.classifications().collect();
        assert_eq!(labels, vec![HIGH, LIMITED, MINIMAL]);
    }
}
