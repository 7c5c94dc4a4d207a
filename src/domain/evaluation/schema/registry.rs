//! Registry of the per-variant output contracts.
//!
//! Descriptors and description maps are built lazily on first use and shared
//! read-only afterwards.

use once_cell::sync::Lazy;

use crate::domain::evaluation::result::Classification;
use crate::domain::evaluation::tool::ToolSpec;
use crate::domain::evaluation::variant::EvaluationVariant;

use super::descriptor::{FieldDescriptions, FieldKind, FieldSpec, ObjectSchema, SchemaDescriptor};

const CORE_DIMENSIONS: [&str; 4] = [
    "debt_capacity",
    "employment_stability",
    "financial_profile",
    "guarantees",
];

const OPTIONAL_DIMENSIONS: [&str; 3] = [
    "demographic_scoring",
    "property_evaluation",
    "operational_risk",
];

static EVALUATOR: Lazy<SchemaDescriptor> = Lazy::new(|| build(EvaluationVariant::Evaluator));
static EXECUTIVE_SUMMARY: Lazy<SchemaDescriptor> =
    Lazy::new(|| build(EvaluationVariant::ExecutiveSummary));
static CLIENT_RESPONSE: Lazy<SchemaDescriptor> =
    Lazy::new(|| build(EvaluationVariant::ClientResponse));

static EVALUATOR_DESCRIPTIONS: Lazy<FieldDescriptions> =
    Lazy::new(|| describe(EvaluationVariant::Evaluator));
static EXECUTIVE_SUMMARY_DESCRIPTIONS: Lazy<FieldDescriptions> =
    Lazy::new(|| describe(EvaluationVariant::ExecutiveSummary));
static CLIENT_RESPONSE_DESCRIPTIONS: Lazy<FieldDescriptions> =
    Lazy::new(|| describe(EvaluationVariant::ClientResponse));

/// Returns the descriptor registered for a variant.
///
/// Idempotent: every call for the same variant returns the same instance.
pub fn define(variant: EvaluationVariant) -> &'static SchemaDescriptor {
    match variant {
        EvaluationVariant::Evaluator => &EVALUATOR,
        EvaluationVariant::ExecutiveSummary => &EXECUTIVE_SUMMARY,
        EvaluationVariant::ClientResponse => &CLIENT_RESPONSE,
    }
}

/// Returns the field semantics used to steer generation for a variant.
pub fn field_descriptions(variant: EvaluationVariant) -> &'static FieldDescriptions {
    match variant {
        EvaluationVariant::Evaluator => &EVALUATOR_DESCRIPTIONS,
        EvaluationVariant::ExecutiveSummary => &EXECUTIVE_SUMMARY_DESCRIPTIONS,
        EvaluationVariant::ClientResponse => &CLIENT_RESPONSE_DESCRIPTIONS,
    }
}

/// Shorthand for `define(variant).tool_spec()`.
pub fn tool_spec(variant: EvaluationVariant) -> ToolSpec {
    define(variant).tool_spec()
}

fn build(variant: EvaluationVariant) -> SchemaDescriptor {
    use EvaluationVariant::*;

    let mut fields = Vec::new();

    fields.push(match variant {
        Evaluator | ExecutiveSummary => FieldSpec::required("score", FieldKind::unit_score()),
        ClientResponse => FieldSpec::optional("score", FieldKind::unit_score()),
    });
    fields.push(FieldSpec::required(
        "clasificacion",
        FieldKind::Enum(Classification::MEMBERS),
    ));

    match variant {
        Evaluator => fields.push(FieldSpec::required("analysis", analysis_kind())),
        ExecutiveSummary => fields.push(FieldSpec::optional("analysis", analysis_kind())),
        ClientResponse => {}
    }

    for name in ["risk_factors", "strengths"] {
        fields.push(match variant {
            Evaluator | ExecutiveSummary => FieldSpec::required(name, FieldKind::text_list()),
            ClientResponse => FieldSpec::optional(name, FieldKind::text_list()),
        });
    }
    fields.push(FieldSpec::required("recommendations", FieldKind::text_list()));

    match variant {
        Evaluator => {}
        ExecutiveSummary => fields.push(FieldSpec::required(
            "executive_summary",
            FieldKind::Text,
        )),
        ClientResponse => fields.push(FieldSpec::required(
            "client_message",
            FieldKind::Text,
        )),
    }

    fields.push(FieldSpec::required("disclaimer", FieldKind::Text));

    SchemaDescriptor::new(variant, tool_description(variant), ObjectSchema::new(fields))
}

fn analysis_kind() -> FieldKind {
    let dimension = || {
        FieldKind::Object(ObjectSchema::new(vec![
            FieldSpec::required("score", FieldKind::unit_score()),
            FieldSpec::required("rationale", FieldKind::Text),
        ]))
    };

    let fields = CORE_DIMENSIONS
        .into_iter()
        .map(|name| FieldSpec::required(name, dimension()))
        .chain(
            OPTIONAL_DIMENSIONS
                .into_iter()
                .map(|name| FieldSpec::optional(name, dimension())),
        )
        .collect();

    FieldKind::Object(ObjectSchema::new(fields))
}

fn tool_description(variant: EvaluationVariant) -> &'static str {
    match variant {
        EvaluationVariant::Evaluator => {
            "Registra la evaluación técnica de riesgo de la solicitud hipotecaria \
             para la entidad financiera."
        }
        EvaluationVariant::ExecutiveSummary => {
            "Registra la conclusión ejecutiva de la evaluación técnica para el \
             comité de riesgos."
        }
        EvaluationVariant::ClientResponse => {
            "Registra la respuesta empática dirigida al cliente sobre su \
             solicitud hipotecaria."
        }
    }
}

fn describe(variant: EvaluationVariant) -> FieldDescriptions {
    let mut d = FieldDescriptions::new();

    d.insert(
        "score",
        "Puntuación global de viabilidad entre 0 (inviable) y 1 (óptima).",
    );
    d.insert(
        "clasificacion",
        "Clasificación global de la operación según su favorabilidad.",
    );
    d.insert(
        "risk_factors",
        "Factores de riesgo detectados, del más al menos relevante.",
    );
    d.insert("strengths", "Fortalezas de la solicitud que favorecen la concesión.");
    d.insert(
        "disclaimer",
        "Aviso final indicando que la evaluación es orientativa y no vinculante.",
    );

    match variant {
        EvaluationVariant::Evaluator | EvaluationVariant::ExecutiveSummary => {
            d.insert(
                "analysis",
                "Desglose del análisis por dimensión, cada una con puntuación y justificación.",
            );
            for (name, description) in dimension_descriptions() {
                d.insert(format!("analysis.{}", name), description);
                d.insert(
                    format!("analysis.{}.score", name),
                    "Puntuación de la dimensión entre 0 y 1.",
                );
                d.insert(
                    format!("analysis.{}.rationale", name),
                    "Justificación breve basada en los datos aportados.",
                );
            }
        }
        EvaluationVariant::ClientResponse => {}
    }

    match variant {
        EvaluationVariant::Evaluator => {
            d.insert(
                "recommendations",
                "Recomendaciones técnicas para la entidad financiera.",
            );
        }
        EvaluationVariant::ExecutiveSummary => {
            d.insert(
                "recommendations",
                "Acciones recomendadas para el comité de riesgos.",
            );
            d.insert(
                "executive_summary",
                "Conclusión ejecutiva concisa de la evaluación técnica.",
            );
        }
        EvaluationVariant::ClientResponse => {
            d.insert(
                "recommendations",
                "Pasos concretos que el cliente puede dar para mejorar su solicitud.",
            );
            d.insert(
                "client_message",
                "Mensaje cercano y empático dirigido al cliente, sin jerga técnica.",
            );
        }
    }

    d
}

fn dimension_descriptions() -> [(&'static str, &'static str); 7] {
    [
        (
            "debt_capacity",
            "Capacidad de endeudamiento: ratio cuota/ingresos y deudas existentes.",
        ),
        (
            "employment_stability",
            "Estabilidad laboral: tipo de contrato, antigüedad y recurrencia de ingresos.",
        ),
        (
            "financial_profile",
            "Perfil financiero: ahorro aportado y solvencia general.",
        ),
        (
            "guarantees",
            "Garantías: relación préstamo/valor de tasación y garantías adicionales.",
        ),
        (
            "demographic_scoring",
            "Factores demográficos: edad al final del plazo y cargas familiares.",
        ),
        (
            "property_evaluation",
            "Evaluación del inmueble: ubicación, precio y tasación.",
        ),
        (
            "operational_risk",
            "Riesgo operacional: vinculaciones y condiciones particulares.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_names(variant: EvaluationVariant) -> Vec<&'static str> {
        define(variant)
            .root()
            .fields()
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name())
            .collect()
    }

    fn declared(variant: EvaluationVariant, name: &str) -> Option<bool> {
        define(variant).root().field(name).map(|f| f.is_required())
    }

    #[test]
    fn define_is_idempotent() {
        for variant in EvaluationVariant::ALL {
            assert!(std::ptr::eq(define(variant), define(variant)));
            assert_eq!(define(variant).variant(), variant);
        }
    }

    #[test]
    fn evaluator_requirements() {
        assert_eq!(
            required_names(EvaluationVariant::Evaluator),
            vec![
                "score",
                "clasificacion",
                "analysis",
                "risk_factors",
                "strengths",
                "recommendations",
                "disclaimer"
            ]
        );
        assert_eq!(declared(EvaluationVariant::Evaluator, "executive_summary"), None);
        assert_eq!(declared(EvaluationVariant::Evaluator, "client_message"), None);
    }

    #[test]
    fn executive_summary_requirements() {
        let v = EvaluationVariant::ExecutiveSummary;
        assert_eq!(declared(v, "analysis"), Some(false));
        assert_eq!(declared(v, "executive_summary"), Some(true));
        assert_eq!(declared(v, "score"), Some(true));
        assert_eq!(declared(v, "client_message"), None);
    }

    #[test]
    fn client_response_requirements() {
        let v = EvaluationVariant::ClientResponse;
        assert_eq!(declared(v, "score"), Some(false));
        assert_eq!(declared(v, "analysis"), None);
        assert_eq!(declared(v, "risk_factors"), Some(false));
        assert_eq!(declared(v, "strengths"), Some(false));
        assert_eq!(declared(v, "recommendations"), Some(true));
        assert_eq!(declared(v, "client_message"), Some(true));
        assert_eq!(declared(v, "disclaimer"), Some(true));
    }

    #[test]
    fn analysis_has_core_and_optional_dimensions() {
        let analysis = define(EvaluationVariant::Evaluator)
            .root()
            .field("analysis")
            .map(|f| f.kind().clone());
        let Some(FieldKind::Object(schema)) = analysis else {
            panic!("analysis must be an object");
        };

        for name in CORE_DIMENSIONS {
            assert_eq!(schema.field(name).map(|f| f.is_required()), Some(true));
        }
        for name in OPTIONAL_DIMENSIONS {
            assert_eq!(schema.field(name).map(|f| f.is_required()), Some(false));
        }
    }

    #[test]
    fn every_declared_top_level_field_is_described() {
        for variant in EvaluationVariant::ALL {
            let descriptions = field_descriptions(variant);
            for field in define(variant).root().fields() {
                assert!(
                    descriptions.get(field.name()).is_some(),
                    "{} lacks a description in {}",
                    field.name(),
                    variant
                );
            }
        }
    }

    #[test]
    fn tool_spec_is_bound_to_variant() {
        let spec = tool_spec(EvaluationVariant::ClientResponse);
        assert_eq!(spec.name(), "redactar_respuesta_cliente");
        assert_eq!(
            spec.input_schema()["properties"]["clasificacion"]["enum"],
            serde_json::json!(Classification::MEMBERS)
        );
        assert!(spec.input_schema()["properties"]["client_message"]["description"].is_string());
    }
}
