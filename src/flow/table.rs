//! Static flow table for the guided suggestion conversation
//!
//! The table is a directed forest of steps keyed by id. Exactly one entry,
//! `"start"`, is the root. Non-terminal steps link to further steps through
//! their option values; terminal steps (`end == true`) carry free-form
//! suggestion-category tokens instead, which never resolve to deeper nodes.
//! That asymmetry is intentional and load-bearing: terminal branches do not
//! need child steps, and the validator must not require them.

use crate::error::{GarcomError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id of the root step. The table is malformed without it.
pub const START_STEP_ID: &str = "start";

/// A single choice offered by a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOption {
    /// Human-readable text shown to the user
    pub label: String,
    /// Id of the next step, or a category token when the owning step is terminal
    pub value: String,
}

impl StepOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One node of the guided-suggestion decision tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Unique key; hierarchy is encoded in underscore-delimited segments
    pub id: String,
    /// Prompt text shown to the user
    pub question: String,
    /// Choices in display order
    pub options: Vec<StepOption>,
    /// Terminal marker: selecting any option triggers suggestion generation
    #[serde(default)]
    pub end: bool,
}

impl Step {
    fn new(id: &str, question: &str, options: Vec<StepOption>) -> Self {
        Self {
            id: id.to_string(),
            question: question.to_string(),
            options,
            end: false,
        }
    }

    fn end_step(id: &str, question: &str, options: Vec<StepOption>) -> Self {
        Self {
            end: true,
            ..Self::new(id, question, options)
        }
    }
}

/// Mapping from step id to step
///
/// Built once at startup and never mutated afterwards. Lookup is by id;
/// insertion order is irrelevant.
#[derive(Debug, Clone)]
pub struct FlowTable {
    steps: HashMap<String, Step>,
}

impl FlowTable {
    /// Builds a table from a list of steps
    ///
    /// # Errors
    ///
    /// Returns an error if no step has id `"start"` or if two steps share
    /// an id. Unresolved option values are reported by [`validate`], not
    /// here, so diagnostic commands can still inspect a broken table.
    ///
    /// [`validate`]: FlowTable::validate
    pub fn from_steps(steps: Vec<Step>) -> Result<Self> {
        let mut map = HashMap::with_capacity(steps.len());
        for step in steps {
            if let Some(previous) = map.insert(step.id.clone(), step) {
                return Err(
                    GarcomError::Navigation(format!("duplicate step id: {}", previous.id)).into(),
                );
            }
        }
        if !map.contains_key(START_STEP_ID) {
            return Err(GarcomError::Navigation("missing start step".to_string()).into());
        }
        Ok(Self { steps: map })
    }

    /// Iterator over all steps, in arbitrary order
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    /// Number of steps in the table
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the table holds no steps (never the case for a built table)
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Step> {
        self.steps.get(id)
    }

    /// Checks the linkage invariant of the table
    ///
    /// For every step with `end == false`, each option value must resolve
    /// to an existing step. Terminal steps are exempt: their option values
    /// are suggestion-category tokens, not step ids.
    ///
    /// Returns the list of violations as human-readable strings; an empty
    /// list means the table is well-formed.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for step in self.steps.values() {
            if step.end {
                continue;
            }
            for option in &step.options {
                if !self.steps.contains_key(&option.value) {
                    violations.push(format!(
                        "step '{}': option '{}' points to unknown step '{}'",
                        step.id, option.label, option.value
                    ));
                }
            }
        }
        violations.sort();
        violations
    }

    /// The built-in decision tree of the dining assistant
    ///
    /// Questions and labels are Portuguese, matching the product copy.
    /// Ids encode hierarchy through underscore-delimited prefixes.
    pub fn builtin() -> Self {
        let steps = vec![
            Step::new(
                "start",
                "O que você está com vontade de comer hoje?",
                vec![
                    StepOption::new("Uma entrada", "entrada"),
                    StepOption::new("Prato principal", "principal"),
                    StepOption::new("Sobremesa", "sobremesa"),
                    StepOption::new("Só uma bebida", "bebida"),
                ],
            ),
            Step::new(
                "entrada",
                "Que tipo de entrada te agrada?",
                vec![
                    StepOption::new("Porções para compartilhar", "entrada_porcoes"),
                    StepOption::new("Uma salada", "entrada_saladas"),
                    StepOption::new("Um caldo quentinho", "entrada_caldos"),
                ],
            ),
            Step::end_step(
                "entrada_porcoes",
                "Qual porção combina com o momento?",
                vec![
                    StepOption::new("Batata frita", "entrada_porcoes_fritas"),
                    StepOption::new("Bolinho de bacalhau", "entrada_porcoes_bolinho"),
                    StepOption::new("Pastel sortido", "entrada_porcoes_pastel"),
                ],
            ),
            Step::end_step(
                "entrada_saladas",
                "Que estilo de salada você prefere?",
                vec![
                    StepOption::new("Folhas verdes", "entrada_saladas_verde"),
                    StepOption::new("Caesar clássica", "entrada_saladas_caesar"),
                    StepOption::new("Tropical com frutas", "entrada_saladas_tropical"),
                ],
            ),
            Step::end_step(
                "entrada_caldos",
                "Qual caldo te aquece hoje?",
                vec![
                    StepOption::new("Caldo de feijão", "entrada_caldos_feijao"),
                    StepOption::new("Caldo de mandioca", "entrada_caldos_mandioca"),
                    StepOption::new("Caldo de legumes", "entrada_caldos_legumes"),
                ],
            ),
            Step::new(
                "principal",
                "Qual estilo de prato principal?",
                vec![
                    StepOption::new("Carnes", "principal_carnes"),
                    StepOption::new("Massas", "principal_massas"),
                    StepOption::new("Peixes e frutos do mar", "principal_peixes"),
                    StepOption::new("Vegetariano", "principal_vegetariano"),
                ],
            ),
            Step::new(
                "principal_carnes",
                "Que tipo de carne você prefere?",
                vec![
                    StepOption::new("Bovina", "principal_carnes_bovina"),
                    StepOption::new("Frango", "principal_carnes_frango"),
                    StepOption::new("Suína", "principal_carnes_suina"),
                ],
            ),
            Step::end_step(
                "principal_carnes_bovina",
                "Como você gosta da carne bovina?",
                vec![
                    StepOption::new("Grelhada no ponto", "principal_carnes_bovina_grelhada"),
                    StepOption::new("Ao molho", "principal_carnes_bovina_molho"),
                    StepOption::new("À parmegiana", "principal_carnes_bovina_parmegiana"),
                ],
            ),
            Step::end_step(
                "principal_carnes_frango",
                "Qual preparo de frango te agrada?",
                vec![
                    StepOption::new("Grelhado", "principal_carnes_frango_grelhado"),
                    StepOption::new("À passarinho", "principal_carnes_frango_passarinho"),
                    StepOption::new("Empanado crocante", "principal_carnes_frango_empanado"),
                ],
            ),
            Step::end_step(
                "principal_carnes_suina",
                "Como prefere a carne suína?",
                vec![
                    StepOption::new("Costelinha ao barbecue", "principal_carnes_suina_costelinha"),
                    StepOption::new("Lombo assado", "principal_carnes_suina_lombo"),
                ],
            ),
            Step::end_step(
                "principal_massas",
                "Qual massa te faz feliz?",
                vec![
                    StepOption::new("Ao molho de tomate", "principal_massas_tomate"),
                    StepOption::new("Ao molho branco", "principal_massas_branco"),
                    StepOption::new("Alho e óleo", "principal_massas_alho"),
                    StepOption::new("Lasanha", "principal_massas_lasanha"),
                ],
            ),
            Step::end_step(
                "principal_peixes",
                "Qual preparo do mar você prefere?",
                vec![
                    StepOption::new("Peixe grelhado", "principal_peixes_grelhado"),
                    StepOption::new("Moqueca", "principal_peixes_moqueca"),
                    StepOption::new("Camarão", "principal_peixes_camarao"),
                ],
            ),
            Step::end_step(
                "principal_vegetariano",
                "Que linha vegetariana te atrai?",
                vec![
                    StepOption::new("Legumes assados", "principal_vegetariano_legumes"),
                    StepOption::new("Risoto", "principal_vegetariano_risoto"),
                    StepOption::new("Hambúrguer vegetal", "principal_vegetariano_burger"),
                ],
            ),
            Step::new(
                "sobremesa",
                "Que tipo de sobremesa você quer?",
                vec![
                    StepOption::new("Doces tradicionais", "sobremesa_doces"),
                    StepOption::new("Algo com frutas", "sobremesa_frutas"),
                    StepOption::new("Gelados", "sobremesa_geladas"),
                ],
            ),
            Step::end_step(
                "sobremesa_doces",
                "Qual doce te tenta mais?",
                vec![
                    StepOption::new("Pudim de leite", "sobremesa_doces_pudim"),
                    StepOption::new("Brigadeiro de colher", "sobremesa_doces_brigadeiro"),
                    StepOption::new("Petit gâteau", "sobremesa_doces_petit"),
                ],
            ),
            Step::end_step(
                "sobremesa_frutas",
                "Como prefere as frutas?",
                vec![
                    StepOption::new("Salada de frutas", "sobremesa_frutas_salada"),
                    StepOption::new("Banana flambada", "sobremesa_frutas_banana"),
                ],
            ),
            Step::end_step(
                "sobremesa_geladas",
                "Qual gelado combina com hoje?",
                vec![
                    StepOption::new("Sorvete artesanal", "sobremesa_geladas_sorvete"),
                    StepOption::new("Açaí na tigela", "sobremesa_geladas_acai"),
                    StepOption::new("Milk-shake", "sobremesa_geladas_milkshake"),
                ],
            ),
            Step::new(
                "bebida",
                "O que você quer beber?",
                vec![
                    StepOption::new("Sucos naturais", "bebida_sucos"),
                    StepOption::new("Refrigerantes", "bebida_refrigerantes"),
                    StepOption::new("Bebidas alcoólicas", "bebida_alcoolicas"),
                ],
            ),
            Step::end_step(
                "bebida_sucos",
                "Qual sabor de suco?",
                vec![
                    StepOption::new("Laranja", "bebida_sucos_laranja"),
                    StepOption::new("Abacaxi com hortelã", "bebida_sucos_abacaxi"),
                    StepOption::new("Maracujá", "bebida_sucos_maracuja"),
                ],
            ),
            Step::end_step(
                "bebida_refrigerantes",
                "Qual refrigerante você prefere?",
                vec![
                    StepOption::new("Cola", "bebida_refrigerantes_cola"),
                    StepOption::new("Guaraná", "bebida_refrigerantes_guarana"),
                ],
            ),
            Step::end_step(
                "bebida_alcoolicas",
                "O que combina com o seu momento?",
                vec![
                    StepOption::new("Cerveja gelada", "bebida_alcoolicas_cerveja"),
                    StepOption::new("Caipirinha", "bebida_alcoolicas_caipirinha"),
                    StepOption::new("Taça de vinho", "bebida_alcoolicas_vinho"),
                ],
            ),
        ];

        // The builtin tree is authored alongside this constructor and covered
        // by tests; construction cannot fail.
        Self::from_steps(steps).expect("builtin flow table is well-formed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_has_start() {
        let table = FlowTable::builtin();
        assert!(table.get(START_STEP_ID).is_some());
        assert!(!table.get(START_STEP_ID).unwrap().end);
    }

    #[test]
    fn test_builtin_table_validates_clean() {
        let table = FlowTable::builtin();
        let violations = table.validate();
        assert!(violations.is_empty(), "violations: {:?}", violations);
    }

    #[test]
    fn test_builtin_table_contains_porcoes_path() {
        let table = FlowTable::builtin();
        let entrada = table.get("entrada").unwrap();
        assert!(entrada.options.iter().any(|o| o.value == "entrada_porcoes"));
        let porcoes = table.get("entrada_porcoes").unwrap();
        assert!(porcoes.end);
        assert!(porcoes
            .options
            .iter()
            .any(|o| o.value == "entrada_porcoes_fritas"));
    }

    #[test]
    fn test_end_step_tokens_need_not_resolve() {
        // Terminal option values are category tokens, not step ids.
        let table = FlowTable::builtin();
        let porcoes = table.get("entrada_porcoes").unwrap();
        for option in &porcoes.options {
            assert!(table.get(&option.value).is_none());
        }
        assert!(table.validate().is_empty());
    }

    #[test]
    fn test_from_steps_rejects_missing_start() {
        let steps = vec![Step::new("other", "?", vec![])];
        assert!(FlowTable::from_steps(steps).is_err());
    }

    #[test]
    fn test_from_steps_rejects_duplicate_id() {
        let steps = vec![
            Step::new("start", "?", vec![]),
            Step::new("start", "again?", vec![]),
        ];
        assert!(FlowTable::from_steps(steps).is_err());
    }

    #[test]
    fn test_validate_reports_dangling_option() {
        let steps = vec![Step::new(
            "start",
            "?",
            vec![StepOption::new("Broken", "nowhere")],
        )];
        let table = FlowTable::from_steps(steps).unwrap();
        let violations = table.validate();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("nowhere"));
    }

    #[test]
    fn test_step_option_order_is_preserved() {
        let table = FlowTable::builtin();
        let start = table.get(START_STEP_ID).unwrap();
        assert_eq!(start.options[0].value, "entrada");
        assert_eq!(start.options[1].value, "principal");
        assert_eq!(start.options[2].value, "sobremesa");
        assert_eq!(start.options[3].value, "bebida");
    }

    #[test]
    fn test_step_serde_round_trip_defaults_end_false() {
        let json = r#"{"id":"x","question":"q","options":[]}"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert!(!step.end);
    }
}
