#![allow(unused_crate_dependencies)]

use graphql_operation_synthesis::{synthesize, synthesize_batch, Error, SynthesisOptions, SynthesisRequest};
use graphql_schema_model::{Introspection, ModelConfig, OperationKind, SchemaModel};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn named_type(kind: &str, name: &str) -> Value {
    json!({ "kind": kind, "name": name })
}

fn non_null(inner: Value) -> Value {
    json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
}

fn list_of(inner: Value) -> Value {
    json!({ "kind": "LIST", "name": null, "ofType": inner })
}

fn field(name: &str, ty: Value) -> Value {
    json!({ "name": name, "args": [], "type": ty })
}

fn field_with_args(name: &str, args: Value, ty: Value) -> Value {
    json!({ "name": name, "args": args, "type": ty })
}

fn arg(name: &str, ty: Value) -> Value {
    json!({ "name": name, "type": ty })
}

fn scalar_def(name: &str) -> Value {
    json!({ "kind": "SCALAR", "name": name })
}

fn object_def(name: &str, fields: Value) -> Value {
    json!({ "kind": "OBJECT", "name": name, "fields": fields })
}

/// Episodes belong to seasons, seasons to shows, and episodes relate to each
/// other, so relationship expansion has both a chain and a cycle to chew on.
fn model() -> SchemaModel {
    let mut types: Vec<Value> = ["Boolean", "Float", "ID", "Int", "String"]
        .into_iter()
        .map(scalar_def)
        .collect();

    types.extend([
        scalar_def("DateTime"),
        object_def(
            "Episode",
            json!([
                field("uid", non_null(named_type("SCALAR", "ID"))),
                field("title", non_null(named_type("SCALAR", "String"))),
                field("airDate", named_type("SCALAR", "DateTime")),
                field("season", named_type("OBJECT", "Season")),
                field("related", list_of(non_null(named_type("OBJECT", "Episode")))),
            ]),
        ),
        object_def(
            "Season",
            json!([
                field("uid", non_null(named_type("SCALAR", "ID"))),
                field("number", non_null(named_type("SCALAR", "Int"))),
                field("show", named_type("OBJECT", "Show")),
            ]),
        ),
        object_def(
            "Show",
            json!([
                field("uid", non_null(named_type("SCALAR", "ID"))),
                field("name", non_null(named_type("SCALAR", "String"))),
            ]),
        ),
        json!({
            "kind": "INPUT_OBJECT",
            "name": "EpisodeInput",
            "inputFields": [
                arg("title", non_null(named_type("SCALAR", "String"))),
                arg("airDate", named_type("SCALAR", "DateTime")),
            ],
        }),
        json!({
            "kind": "INPUT_OBJECT",
            "name": "SeasonInput",
            "inputFields": [arg("number", named_type("SCALAR", "Int"))],
        }),
        object_def(
            "Query",
            json!([
                field_with_args(
                    "getEpisode",
                    json!([
                        arg("uid", non_null(named_type("SCALAR", "ID"))),
                        arg("locale", named_type("SCALAR", "String")),
                    ]),
                    named_type("OBJECT", "Episode"),
                ),
                field_with_args(
                    "listEpisodes",
                    json!([arg("limit", named_type("SCALAR", "Int"))]),
                    non_null(list_of(non_null(named_type("OBJECT", "Episode")))),
                ),
                field_with_args(
                    "getSeason",
                    json!([arg("uid", non_null(named_type("SCALAR", "ID")))]),
                    named_type("OBJECT", "Season"),
                ),
                field("listSeasons", list_of(named_type("OBJECT", "Season"))),
            ]),
        ),
        object_def(
            "Mutation",
            json!([
                field_with_args(
                    "createEpisode",
                    json!([arg("data", non_null(named_type("INPUT_OBJECT", "EpisodeInput")))]),
                    named_type("OBJECT", "Episode"),
                ),
                field_with_args(
                    "updateEpisode",
                    json!([
                        arg("uid", non_null(named_type("SCALAR", "ID"))),
                        arg("data", non_null(named_type("INPUT_OBJECT", "EpisodeInput"))),
                    ]),
                    named_type("OBJECT", "Episode"),
                ),
                field_with_args(
                    "updateSeason",
                    json!([
                        arg("uid", non_null(named_type("SCALAR", "ID"))),
                        arg("data", non_null(named_type("INPUT_OBJECT", "SeasonInput"))),
                    ]),
                    named_type("OBJECT", "Season"),
                ),
                field_with_args(
                    "deleteEpisode",
                    json!([arg("uid", non_null(named_type("SCALAR", "ID")))]),
                    named_type("OBJECT", "Episode"),
                ),
            ]),
        ),
    ]);

    let introspection: Introspection = serde_json::from_value(json!({
        "queryType": { "name": "Query" },
        "mutationType": { "name": "Mutation" },
        "types": types,
    }))
    .unwrap();

    SchemaModel::build(&introspection, &ModelConfig::default())
        .into_result()
        .unwrap()
}

/// Every synthesized document must survive an independent parser.
fn assert_parses(text: &str) {
    cynic_parser::parse_executable_document(text).unwrap();
}

#[test]
fn full_selection_get_document() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Get).with_argument("uid", "ep-1");

    let document = synthesize(&model, &request, &SynthesisOptions::default().with_depth_limit(1)).unwrap();

    assert_parses(&document.text);
    insta::assert_snapshot!(
        document.text,
        @"query($uid: ID!) { getEpisode(uid: $uid) { airDate related { airDate title uid } season { number uid } title uid } }"
    );

    assert_eq!(document.variables, json!({ "uid": "ep-1" }).as_object().unwrap().clone());
    assert_eq!(
        document.truncated,
        [
            "Episode.related.related",
            "Episode.related.season",
            "Episode.season.show"
        ]
    );
}

#[test]
fn explicit_selections_are_sorted_and_exact() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Get)
        .with_argument("uid", "ep-1")
        .with_selection(["uid", "title"]);

    let document = synthesize(&model, &request, &SynthesisOptions::default()).unwrap();

    assert_parses(&document.text);
    insta::assert_snapshot!(
        document.text,
        @"query($uid: ID!) { getEpisode(uid: $uid) { title uid } }"
    );
}

#[test]
fn duplicate_selection_entries_appear_once() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Get)
        .with_argument("uid", "ep-1")
        .with_selection(["uid", "title", "uid"]);

    let document = synthesize(&model, &request, &SynthesisOptions::default()).unwrap();

    insta::assert_snapshot!(
        document.text,
        @"query($uid: ID!) { getEpisode(uid: $uid) { title uid } }"
    );
}

#[test]
fn selecting_an_unknown_field_fails() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Get)
        .with_argument("uid", "ep-1")
        .with_selection(["uid", "rating"]);

    let err = synthesize(&model, &request, &SynthesisOptions::default()).unwrap_err();

    assert!(matches!(
        &err,
        Error::FieldNotFound { object_type, field } if object_type == "Episode" && field == "rating"
    ));
    assert_eq!(err.to_string(), "Episode has no field named rating");
}

#[test]
fn unsupported_operations_fail_instead_of_returning_an_empty_document() {
    let model = model();
    let request = SynthesisRequest::new("Season", OperationKind::Delete).with_argument("uid", "s-1");

    let err = synthesize(&model, &request, &SynthesisOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        Error::OperationNotSupported {
            kind: OperationKind::Delete,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Season does not support the delete operation");
}

#[test]
fn unknown_object_types_fail() {
    let model = model();
    let request = SynthesisRequest::new("Character", OperationKind::Get);

    let err = synthesize(&model, &request, &SynthesisOptions::default()).unwrap_err();

    assert!(matches!(err, Error::UnknownObjectType(name) if name == "Character"));
}

#[test]
fn undeclared_arguments_fail() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Get)
        .with_argument("uid", "ep-1")
        .with_argument("publishedAfter", "2024-01-01");

    let err = synthesize(&model, &request, &SynthesisOptions::default()).unwrap_err();

    assert!(matches!(err, Error::UnknownArgument { name, .. } if name == "publishedAfter"));
}

#[test]
fn relationship_chains_truncate_at_the_depth_limit() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Get).with_argument("uid", "ep-1");

    let document = synthesize(&model, &request, &SynthesisOptions::default().with_depth_limit(2)).unwrap();

    assert_parses(&document.text);
    // Two hops expand: season.show is reachable, related.season.show is not.
    insta::assert_snapshot!(
        document.text,
        @"query($uid: ID!) { getEpisode(uid: $uid) { airDate related { airDate related { airDate title uid } season { number uid } title uid } season { number show { name uid } uid } title uid } }"
    );
    assert_eq!(
        document.truncated,
        [
            "Episode.related.related.related",
            "Episode.related.related.season",
            "Episode.related.season.show"
        ]
    );
}

#[test]
fn truncating_every_selected_field_is_an_error() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Get)
        .with_argument("uid", "ep-1")
        .with_selection(["season"]);

    let err = synthesize(&model, &request, &SynthesisOptions::default().with_depth_limit(0)).unwrap_err();

    assert!(matches!(err, Error::EmptySelection { object_type } if object_type == "Episode"));
}

#[test]
fn create_binds_the_input_object_to_a_variable() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Create)
        .with_argument("data", json!({ "title": "Pilot", "airDate": "2026-01-01T20:00:00Z" }))
        .with_selection(["uid"]);

    let document = synthesize(&model, &request, &SynthesisOptions::default()).unwrap();

    assert_parses(&document.text);
    insta::assert_snapshot!(
        document.text,
        @"mutation($data: EpisodeInput!) { createEpisode(data: $data) { uid } }"
    );
    assert_eq!(
        document.variables,
        json!({ "data": { "title": "Pilot", "airDate": "2026-01-01T20:00:00Z" } })
            .as_object()
            .unwrap()
            .clone()
    );
}

#[test]
fn single_requests_honor_the_caller_alias() {
    let model = model();
    let request = SynthesisRequest::new("Episode", OperationKind::Get)
        .with_argument("uid", "ep-1")
        .with_selection(["uid"])
        .with_alias("episode");

    let document = synthesize(&model, &request, &SynthesisOptions::default()).unwrap();

    assert_parses(&document.text);
    insta::assert_snapshot!(
        document.text,
        @"query($uid: ID!) { episode: getEpisode(uid: $uid) { uid } }"
    );
}

#[test]
fn batches_get_deterministic_aliases_and_variable_names() {
    let model = model();
    let requests = [
        SynthesisRequest::new("Episode", OperationKind::Update)
            .with_argument("uid", "ep-1")
            .with_argument("data", json!({ "title": "Pilot, revised" }))
            .with_selection(["uid"]),
        SynthesisRequest::new("Season", OperationKind::Update)
            .with_argument("uid", "s-1")
            .with_argument("data", json!({ "number": 2 }))
            .with_selection(["uid"]),
    ];

    let document = synthesize_batch(&model, &requests, &SynthesisOptions::default()).unwrap();

    assert_parses(&document.text);
    insta::assert_snapshot!(
        document.text,
        @"mutation($data_0: EpisodeInput!, $uid_0: ID!, $data_1: SeasonInput!, $uid_1: ID!) { update_episode_0: updateEpisode(data: $data_0, uid: $uid_0) { uid } update_season_1: updateSeason(data: $data_1, uid: $uid_1) { uid } }"
    );

    let variable_names: Vec<&str> = document.variables.keys().map(String::as_str).collect();
    assert_eq!(variable_names, ["data_0", "uid_0", "data_1", "uid_1"]);
}

#[test]
fn repeated_batches_produce_identical_documents() {
    let model = model();
    let requests = [
        SynthesisRequest::new("Episode", OperationKind::Update)
            .with_argument("uid", "ep-1")
            .with_argument("data", json!({ "title": "Pilot, revised" }))
            .with_selection(["uid"]),
        SynthesisRequest::new("Season", OperationKind::Update)
            .with_argument("uid", "s-1")
            .with_argument("data", json!({ "number": 2 }))
            .with_selection(["uid"]),
    ];

    let first = synthesize_batch(&model, &requests, &SynthesisOptions::default()).unwrap();
    let second = synthesize_batch(&model, &requests, &SynthesisOptions::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn mixed_batches_are_rejected() {
    let model = model();
    let requests = [
        SynthesisRequest::new("Episode", OperationKind::Get).with_argument("uid", "ep-1"),
        SynthesisRequest::new("Episode", OperationKind::Update)
            .with_argument("uid", "ep-1")
            .with_argument("data", json!({ "title": "x" })),
    ];

    let err = synthesize_batch(&model, &requests, &SynthesisOptions::default()).unwrap_err();

    assert!(matches!(err, Error::MixedOperationTypes));
}

#[test]
fn empty_batches_are_rejected() {
    let model = model();

    let err = synthesize_batch(&model, &[], &SynthesisOptions::default()).unwrap_err();

    assert!(matches!(err, Error::EmptyBatch));
}
