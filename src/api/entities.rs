//! Entity-level modules: editing, lookup, search, terms, site links and
//! value formatting/parsing.

use super::types::SortDirection;
use super::validate;
use super::RepoApi;
use crate::executor::RequestExecutor;
use crate::params::{MultiValue, ParameterMap};
use crate::{Error, ErrorContext, Result};
use serde_json::{json, Value};

impl<E: RequestExecutor> RepoApi<E> {
    /// Create a new entity of `entity_type`, optionally with initial data
    /// (an empty entity when `data` is `None`).
    pub async fn create_entity(&self, entity_type: &str, data: Option<&Value>) -> Result<Value> {
        validate::optional_object("create_entity", "data", data)?;
        let empty = json!({});
        let mut params = ParameterMap::for_action("wbeditentity");
        params
            .require("new", entity_type)
            .insert("data", validate::to_json(data.unwrap_or(&empty))?);
        self.post(params).await
    }

    /// Edit an entity. With `clear` the entity is emptied before `data` is applied.
    pub async fn edit_entity(
        &self,
        id: &str,
        base_rev_id: u64,
        data: &Value,
        clear: bool,
    ) -> Result<Value> {
        validate::require_object("edit_entity", "data", data)?;
        let mut params = ParameterMap::for_action("wbeditentity");
        params
            .require("id", id)
            .insert("baserevid", base_rev_id)
            .insert("data", validate::to_json(data)?);
        if clear {
            params.insert("clear", true);
        }
        self.post(params).await
    }

    /// Format a data value serialization.
    ///
    /// When both are given, `property_id` wins over `data_type`: the server
    /// derives the data type from the property, so only `property` is sent.
    pub async fn format_value(
        &self,
        data_value: &Value,
        options: Option<&Value>,
        data_type: Option<&str>,
        output_format: Option<&str>,
        property_id: Option<&str>,
    ) -> Result<Value> {
        validate::require_object("format_value", "datavalue", data_value)?;
        validate::optional_object("format_value", "options", options)?;
        let empty = json!({});
        let mut params = ParameterMap::for_action("wbformatvalue");
        params
            .insert("datavalue", validate::to_json(data_value)?)
            .insert("options", validate::to_json(options.unwrap_or(&empty))?);
        match (property_id.filter(|p| !p.is_empty()), data_type.filter(|d| !d.is_empty())) {
            (Some(property), _) => {
                params.insert("property", property);
            }
            (None, Some(data_type)) => {
                params.insert("datatype", data_type);
            }
            (None, None) => {}
        }
        params.insert_opt("generate", output_format.filter(|f| !f.is_empty()));
        self.get(params).await
    }

    /// Fetch one or more entities by id. Absent optional arguments are not sent.
    pub async fn get_entities(
        &self,
        ids: impl Into<MultiValue>,
        props: Option<MultiValue>,
        languages: Option<MultiValue>,
        sort: Option<MultiValue>,
        dir: Option<SortDirection>,
    ) -> Result<Value> {
        let ids = ids.into();
        validate::multi("get_entities", "ids", &ids)?;
        validate::optional_multi("get_entities", "props", props.as_ref())?;
        validate::optional_multi("get_entities", "languages", languages.as_ref())?;
        validate::optional_multi("get_entities", "sort", sort.as_ref())?;

        let mut params = ParameterMap::for_action("wbgetentities");
        params
            .require_multi("ids", &ids)
            .insert_multi_opt("props", props.as_ref())
            .insert_multi_opt("languages", languages.as_ref())
            .insert_multi_opt("sort", sort.as_ref())
            .insert_opt("dir", dir.map(|d| d.as_str()));
        self.get(params).await
    }

    /// Fetch the entities linked to site/page pairs.
    ///
    /// Either `sites` or `titles` may list several values, never both.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_entities_by_page(
        &self,
        sites: impl Into<MultiValue>,
        titles: impl Into<MultiValue>,
        props: Option<MultiValue>,
        languages: Option<MultiValue>,
        sort: Option<MultiValue>,
        dir: Option<SortDirection>,
        normalize: Option<bool>,
    ) -> Result<Value> {
        let sites = sites.into();
        let titles = titles.into();
        if sites.is_multi() && titles.is_multi() {
            return Err(Error::invalid_argument_with_context(
                "sites and titles cannot both list several values",
                ErrorContext::new()
                    .with_field_path("titles")
                    .with_details(format!("{} sites, {} titles", sites.len(), titles.len()))
                    .with_source("get_entities_by_page"),
            ));
        }
        validate::multi("get_entities_by_page", "sites", &sites)?;
        validate::multi("get_entities_by_page", "titles", &titles)?;
        validate::optional_multi("get_entities_by_page", "props", props.as_ref())?;
        validate::optional_multi("get_entities_by_page", "languages", languages.as_ref())?;
        validate::optional_multi("get_entities_by_page", "sort", sort.as_ref())?;

        let mut params = ParameterMap::for_action("wbgetentities");
        params
            .require_multi("sites", &sites)
            .require_multi("titles", &titles)
            .insert_multi_opt("props", props.as_ref())
            .insert_multi_opt("languages", languages.as_ref())
            .insert_multi_opt("sort", sort.as_ref())
            .insert_opt("dir", dir.map(|d| d.as_str()))
            .insert_opt("normalize", normalize);
        self.get(params).await
    }

    /// Parse raw strings into data values with the given parser.
    pub async fn parse_value(
        &self,
        parser: &str,
        values: &[&str],
        options: Option<&Value>,
    ) -> Result<Value> {
        let values = MultiValue::from(values);
        validate::multi("parse_value", "values", &values)?;
        validate::optional_object("parse_value", "options", options)?;
        let empty = json!({});
        let mut params = ParameterMap::for_action("wbparsevalue");
        params
            .require("parser", parser)
            .require_multi("values", &values)
            .insert("options", validate::to_json(options.unwrap_or(&empty))?);
        self.get(params).await
    }

    /// Search entities by label or alias.
    ///
    /// `language` is sent twice, as `language` and as the interface language
    /// `uselang`. Existing callers depend on both being present.
    pub async fn search_entities(
        &self,
        search: &str,
        language: &str,
        entity_type: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Value> {
        let mut params = ParameterMap::for_action("wbsearchentities");
        params
            .require("search", search)
            .require("language", language)
            .require("uselang", language)
            .require("type", entity_type)
            .insert_opt("limit", limit.filter(|l| *l > 0))
            .insert_opt("continue", offset.filter(|o| *o > 0));
        self.get(params).await
    }

    /// Set the label of an entity in one language. An empty `label` removes it.
    pub async fn set_label(
        &self,
        id: &str,
        base_rev_id: u64,
        label: &str,
        language: &str,
    ) -> Result<Value> {
        self.post(term_params("wbsetlabel", id, base_rev_id, label, language))
            .await
    }

    /// Set the description of an entity in one language. An empty `description` removes it.
    pub async fn set_description(
        &self,
        id: &str,
        base_rev_id: u64,
        description: &str,
        language: &str,
    ) -> Result<Value> {
        self.post(term_params(
            "wbsetdescription",
            id,
            base_rev_id,
            description,
            language,
        ))
        .await
    }

    /// Add and/or remove aliases in one language. Both lists are sent, even when empty.
    pub async fn set_aliases(
        &self,
        id: &str,
        base_rev_id: u64,
        add: impl Into<MultiValue>,
        remove: impl Into<MultiValue>,
        language: &str,
    ) -> Result<Value> {
        let add = add.into();
        let remove = remove.into();
        validate::multi("set_aliases", "add", &add)?;
        validate::multi("set_aliases", "remove", &remove)?;
        let mut params = ParameterMap::for_action("wbsetaliases");
        params
            .require("id", id)
            .insert("add", &add)
            .insert("remove", &remove)
            .require("language", language)
            .insert("baserevid", base_rev_id);
        self.post(params).await
    }

    /// Set (or, with an empty `title`, remove) a site link of an item.
    pub async fn set_sitelink(
        &self,
        id: &str,
        base_rev_id: u64,
        site: &str,
        title: &str,
        badges: Option<MultiValue>,
    ) -> Result<Value> {
        validate::optional_multi("set_sitelink", "badges", badges.as_ref())?;
        let mut params = ParameterMap::for_action("wbsetsitelink");
        params
            .require("id", id)
            .require("linksite", site)
            .insert("linktitle", title)
            .insert("baserevid", base_rev_id)
            .insert_opt("badges", badges.as_ref());
        self.post(params).await
    }

    /// Merge item `from_id` into `to_id`.
    pub async fn merge_items(
        &self,
        from_id: &str,
        to_id: &str,
        ignore_conflicts: Option<MultiValue>,
        summary: Option<&str>,
    ) -> Result<Value> {
        validate::optional_multi("merge_items", "ignoreconflicts", ignore_conflicts.as_ref())?;
        let mut params = ParameterMap::for_action("wbmergeitems");
        params
            .require("fromid", from_id)
            .require("toid", to_id)
            .insert_opt("ignoreconflicts", ignore_conflicts.as_ref())
            .insert_opt("summary", summary.filter(|s| !s.is_empty()));
        self.post(params).await
    }
}

fn term_params(action: &str, id: &str, base_rev_id: u64, text: &str, language: &str) -> ParameterMap {
    let mut params = ParameterMap::for_action(action);
    params
        .require("id", id)
        .insert("value", text)
        .require("language", language)
        .insert("baserevid", base_rev_id);
    params
}
