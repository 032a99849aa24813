//! Patient aggregate wire models.
//!
//! One document per patient; nested collections have no identity or
//! lifecycle of their own. Field names follow the established wire
//! format of the clinic frontend (`nombre`, `tratamientos`,
//! `historiaClinica`, ...), so existing callers keep working.
//!
//! Responsibilities:
//! - Define the full `Patient` aggregate and its nested types
//! - Define `PatientPatch`, the partial-update payload that
//!   distinguishes "field absent" from "field present but empty"
//! - Keep nested entries lenient: the store never validates their
//!   internal consistency, only their shape

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored patient: system-assigned identifier plus the record fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    /// Opaque identifier, assigned once at creation, never reassigned.
    pub id: String,
    #[serde(flatten)]
    pub record: PatientRecord,
}

/// The client-suppliable fields of a patient document.
///
/// `nombre` is the only field with a presence constraint, and only at
/// creation time; everything else may be absent or empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRecord {
    #[serde(default)]
    #[schema(example = "Ana Ruiz")]
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "ana@example.com")]
    pub correo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celular: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    /// Billable treatments, insertion order is display order.
    #[serde(default)]
    pub tratamientos: Vec<Treatment>,
    #[serde(rename = "historiaClinica", default, skip_serializing_if = "Option::is_none")]
    pub historia_clinica: Option<ClinicalHistory>,
}

/// A billable treatment line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Treatment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "26")]
    pub diente: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Resina")]
    pub tratamiento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
}

/// Embedded clinical history, at most one per patient.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClinicalHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antecedentes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostico: Option<String>,
    /// Chronological ledger of treatment and payment events.
    #[serde(default)]
    pub evolucion: Vec<EvolutionEntry>,
    #[serde(default)]
    pub radiografias: Vec<Radiograph>,
}

/// One ledger event, discriminated by the `tipo` wire field.
///
/// The two variants carry only their own fields; reading a payment
/// field off a treatment event is unrepresentable. Variant fields stay
/// optional because callers historically sent sparse entries and the
/// store accepts them as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "tipo", rename_all = "lowercase")]
pub enum EvolutionEntry {
    Tratamiento {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fecha: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tratamiento: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diente: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        costo: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        abono: Option<f64>,
    },
    Abono {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fecha: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        monto: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nota: Option<String>,
    },
}

/// An embedded radiograph image, base64 text in `data`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Radiograph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
}

/// Partial-update payload: only fields present here are overwritten.
///
/// Array fields and `historiaClinica` are replaced wholesale when
/// present; callers resend the full desired collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celular: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tratamientos: Option<Vec<Treatment>>,
    #[serde(rename = "historiaClinica", default, skip_serializing_if = "Option::is_none")]
    pub historia_clinica: Option<ClinicalHistory>,
}

impl PatientPatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == PatientPatch::default()
    }

    /// Overwrite the supplied fields of `record`, leaving the rest.
    pub fn apply(self, record: &mut PatientRecord) {
        if let Some(nombre) = self.nombre {
            record.nombre = nombre;
        }
        if let Some(correo) = self.correo {
            record.correo = Some(correo);
        }
        if let Some(celular) = self.celular {
            record.celular = Some(celular);
        }
        if let Some(edad) = self.edad {
            record.edad = Some(edad);
        }
        if let Some(doctor) = self.doctor {
            record.doctor = Some(doctor);
        }
        if let Some(fecha) = self.fecha {
            record.fecha = Some(fecha);
        }
        if let Some(tratamientos) = self.tratamientos {
            record.tratamientos = tratamientos;
        }
        if let Some(historia) = self.historia_clinica {
            record.historia_clinica = Some(historia);
        }
    }
}
