//! Entity kinds served by the API and the payloads accepted for them.

use crate::codec::{deserialize_amount, required, ResourceId};
use crate::error::CodecError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Largest magnitude a `NUMERIC(10,2)` column holds, in hundredths.
const MAX_CENTS: f64 = 9_999_999_999.0;
const MAX_NAME_LEN: usize = 100;

/// Binds an entity kind to its identifier, request payload, and route.
pub trait Resource: Serialize + Send + Sync + 'static {
    type Id: ResourceId;
    type Payload: DeserializeOwned + Send;
    /// A payload with every required field present and checked.
    type Draft: Send + Sync + 'static;

    /// Singular name used in messages and logs.
    const NAME: &'static str;
    /// Path segment the routes are mounted under.
    const PATH: &'static str;

    fn draft(payload: Self::Payload) -> Result<Self::Draft, CodecError>;

    /// The entity a write of `draft` under `id` describes, without reading the store.
    fn echo(id: Self::Id, draft: Self::Draft) -> Self;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: i32,
    pub nome: String,
    pub preco: f64,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ItemPayload {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub preco: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemDraft {
    pub nome: String,
    pub preco: f64,
}

impl Item {
    pub fn from_draft(id: i32, draft: ItemDraft) -> Self {
        Item {
            id,
            nome: draft.nome,
            preco: draft.preco,
        }
    }
}

impl Resource for Item {
    type Id = i32;
    type Payload = ItemPayload;
    type Draft = ItemDraft;

    const NAME: &'static str = "item";
    const PATH: &'static str = "/itens";

    fn draft(payload: ItemPayload) -> Result<ItemDraft, CodecError> {
        let nome = required(payload.nome, "nome")?;
        if nome.chars().count() > MAX_NAME_LEN {
            return Err(CodecError::Invalid(format!(
                "nome must be at most {} characters",
                MAX_NAME_LEN
            )));
        }
        let preco = check_amount("preco", required(payload.preco, "preco")?)?;
        Ok(ItemDraft { nome, preco })
    }

    fn echo(id: i32, draft: ItemDraft) -> Self {
        Item::from_draft(id, draft)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Bill {
    pub id: Uuid,
    pub embasa: f64,
    pub coelba: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Timestamps in the body are ignored; the store assigns them.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct BillPayload {
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub embasa: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub coelba: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BillDraft {
    pub embasa: f64,
    pub coelba: f64,
}

impl Resource for Bill {
    type Id = Uuid;
    type Payload = BillPayload;
    type Draft = BillDraft;

    const NAME: &'static str = "bill";
    const PATH: &'static str = "/bills";

    fn draft(payload: BillPayload) -> Result<BillDraft, CodecError> {
        Ok(BillDraft {
            embasa: check_amount("embasa", required(payload.embasa, "embasa")?)?,
            coelba: check_amount("coelba", required(payload.coelba, "coelba")?)?,
        })
    }

    /// Both timestamps are the current time, since no stored row backs the value.
    fn echo(id: Uuid, draft: BillDraft) -> Self {
        let now = Utc::now();
        Bill {
            id,
            embasa: draft.embasa,
            coelba: draft.coelba,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The store rounds to cents, so the bound applies to the rounded value.
fn check_amount(field: &str, value: f64) -> Result<f64, CodecError> {
    if !value.is_finite() || (value * 100.0).round().abs() > MAX_CENTS {
        return Err(CodecError::Invalid(format!(
            "{} must be a finite amount of at most 99999999.99",
            field
        )));
    }
    Ok(value)
}
