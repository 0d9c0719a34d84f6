//! Claim and reference modules.

use super::types::{HashOrIndex, Rank, SnakType};
use super::validate;
use super::RepoApi;
use crate::executor::RequestExecutor;
use crate::params::{MultiValue, ParameterMap};
use crate::{Error, ErrorContext, Result};
use serde_json::Value;

impl<E: RequestExecutor> RepoApi<E> {
    /// Create or replace a whole claim. `index` moves the claim within its
    /// entity's claim list and is only sent when given.
    pub async fn set_claim(&self, claim: &Value, base_rev_id: u64, index: Option<u32>) -> Result<Value> {
        validate::require_object("set_claim", "claim", claim)?;
        let mut params = ParameterMap::for_action("wbsetclaim");
        params
            .insert("claim", validate::to_json(claim)?)
            .insert("baserevid", base_rev_id)
            .insert_opt("index", index);
        self.post(params).await
    }

    /// Create a claim on an entity.
    ///
    /// `value` is the data value serialization. The server rejects a
    /// [`SnakType::Value`] claim without one; that rule is not checked here.
    /// `Some(&Value::Null)` is `InvalidArgument`; pass `None` to leave the
    /// value out.
    pub async fn create_claim(
        &self,
        entity_id: &str,
        base_rev_id: u64,
        snak_type: SnakType,
        property_id: &str,
        value: Option<&Value>,
    ) -> Result<Value> {
        let mut params = ParameterMap::for_action("wbcreateclaim");
        params.require("entity", entity_id);
        snak_params(&mut params, "create_claim", base_rev_id, snak_type, property_id, value)?;
        self.post(params).await
    }

    /// Remove a claim by GUID.
    pub async fn remove_claim(&self, claim_guid: &str, base_rev_id: Option<u64>) -> Result<Value> {
        let mut params = ParameterMap::for_action("wbremoveclaims");
        params
            .require("claim", claim_guid)
            .insert_opt("baserevid", base_rev_id);
        self.post(params).await
    }

    /// Fetch the claims of an entity, or a single claim by GUID.
    pub async fn get_claims(
        &self,
        entity_id: Option<&str>,
        property_id: Option<&str>,
        claim_guid: Option<&str>,
        rank: Option<Rank>,
        props: Option<&str>,
    ) -> Result<Value> {
        let entity_id = entity_id.filter(|s| !s.trim().is_empty());
        let claim_guid = claim_guid.filter(|s| !s.trim().is_empty());
        if entity_id.is_none() && claim_guid.is_none() {
            return Err(Error::invalid_argument_with_context(
                "either an entity id or a claim GUID is required",
                ErrorContext::new()
                    .with_field_path("entity")
                    .with_source("get_claims"),
            ));
        }
        let mut params = ParameterMap::for_action("wbgetclaims");
        params
            .insert_opt("entity", entity_id)
            .insert_opt("property", property_id.filter(|s| !s.is_empty()))
            .insert_opt("claim", claim_guid)
            .insert_opt("rank", rank.map(|r| r.as_str()))
            .insert_opt("props", props.filter(|s| !s.is_empty()));
        self.get(params).await
    }

    /// Change the main snak of an existing claim.
    ///
    /// `property_id` is sent as well although the server does not allow
    /// changing it; it only answers with a warning. As with
    /// [`RepoApi::create_claim`], a JSON `null` value is `InvalidArgument`.
    pub async fn set_claim_value(
        &self,
        claim_guid: &str,
        base_rev_id: u64,
        snak_type: SnakType,
        property_id: &str,
        value: Option<&Value>,
    ) -> Result<Value> {
        let mut params = ParameterMap::for_action("wbsetclaimvalue");
        params.require("claim", claim_guid);
        snak_params(&mut params, "set_claim_value", base_rev_id, snak_type, property_id, value)?;
        self.post(params).await
    }

    /// Add a reference to a statement, or update the one identified by `reference_hash`.
    ///
    /// Without a hash a new reference is created. `index` positions the
    /// reference within the statement's reference list. A
    /// [`HashOrIndex::Index`] in the hash slot is treated as the index when
    /// `index` is `None`.
    pub async fn set_reference(
        &self,
        statement_guid: &str,
        snaks: &Value,
        base_rev_id: u64,
        reference_hash: Option<HashOrIndex>,
        index: Option<u32>,
    ) -> Result<Value> {
        validate::require_object("set_reference", "snaks", snaks)?;
        let (hash, index) = resolve_reference_target(reference_hash, index)?;
        let mut params = ParameterMap::for_action("wbsetreference");
        params
            .require("statement", statement_guid)
            .insert("snaks", validate::to_json(snaks)?)
            .insert("baserevid", base_rev_id)
            .insert_opt("reference", hash)
            .insert_opt("index", index);
        self.post(params).await
    }

    /// Remove one or more references of a statement by hash.
    pub async fn remove_references(
        &self,
        statement_guid: &str,
        reference_hashes: impl Into<MultiValue>,
        base_rev_id: u64,
    ) -> Result<Value> {
        let hashes = reference_hashes.into();
        validate::multi("remove_references", "references", &hashes)?;
        let mut params = ParameterMap::for_action("wbremovereferences");
        params
            .require("statement", statement_guid)
            .require_multi("references", &hashes)
            .insert("baserevid", base_rev_id);
        self.post(params).await
    }
}

/// `value` is sent only when given; a JSON `null` is rejected rather than omitted.
fn snak_params(
    params: &mut ParameterMap,
    operation: &str,
    base_rev_id: u64,
    snak_type: SnakType,
    property_id: &str,
    value: Option<&Value>,
) -> Result<()> {
    params
        .insert("baserevid", base_rev_id)
        .insert("snaktype", snak_type.as_str())
        .require("property", property_id);
    if let Some(value) = value {
        validate::require_present(operation, "value", value)?;
        params.insert("value", validate::to_json(value)?);
    }
    Ok(())
}

/// Split the hash slot and the index into the `reference` and `index` parameters.
fn resolve_reference_target(
    reference_hash: Option<HashOrIndex>,
    index: Option<u32>,
) -> Result<(Option<String>, Option<u32>)> {
    match (reference_hash, index) {
        (Some(HashOrIndex::Index(legacy)), None) => Ok((None, Some(legacy))),
        (Some(HashOrIndex::Index(_)), Some(_)) => Err(Error::invalid_argument_with_context(
            "reference hash must be a string when an index is given",
            ErrorContext::new()
                .with_field_path("reference")
                .with_source("set_reference"),
        )),
        (Some(HashOrIndex::Hash(hash)), index) => {
            Ok((Some(hash).filter(|h| !h.is_empty()), index))
        }
        (None, index) => Ok((None, index)),
    }
}
