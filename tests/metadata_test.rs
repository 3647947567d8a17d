mod common;

use assert2::{check, let_assert};
use cargo_metadata::Metadata;
use cargo_workspace_mcp::tools::load_workspace;
use cargo_workspace_mcp::workspace::{
    CargoWorkspace, CleanCargoMetadata, PackageOrigin, TargetKind, fetch_clean_metadata,
};
use common::project_root;
use serde_json::json;

/// `cargo metadata` output for a workspace whose only member `app` depends on
/// `log` and has the path crate `testkit` as a dev-dependency that depends
/// back on `app`.
fn cargo_metadata_json() -> serde_json::Value {
    let package = |name: &str, dir: &str, source: Option<&str>, targets: serde_json::Value| {
        json!({
            "name": name,
            "version": "0.1.0",
            "id": format!("{}#{}@0.1.0", dir, name),
            "source": source,
            "description": null,
            "dependencies": [],
            "license": null,
            "license_file": null,
            "targets": targets,
            "features": {},
            "manifest_path": format!("{}/Cargo.toml", dir),
            "metadata": null,
            "publish": null,
            "authors": [],
            "categories": [],
            "keywords": [],
            "readme": null,
            "repository": null,
            "homepage": null,
            "documentation": null,
            "edition": "2021",
            "links": null,
            "default_run": null
        })
    };
    let target = |name: &str, kinds: &[&str], src: &str| {
        let crate_types = if kinds == ["custom-build"] { &["bin"][..] } else { kinds };
        json!({
            "name": name,
            "kind": kinds,
            "crate_types": crate_types,
            "required-features": [],
            "src_path": src,
            "edition": "2021",
            "doctest": true,
            "test": true,
            "doc": true
        })
    };
    let id = |dir: &str, name: &str| format!("{}#{}@0.1.0", dir, name);

    json!({
        "packages": [
            package("app", "/ws/app", None, json!([
                target("app", &["lib"], "/ws/app/src/lib.rs"),
                target("app", &["bin"], "/ws/app/src/main.rs"),
                target("build-script-build", &["custom-build"], "/ws/app/build.rs")
            ])),
            package("testkit", "/ws/testkit", None, json!([
                target("testkit", &["lib"], "/ws/testkit/src/lib.rs")
            ])),
            package("log", "/registry/log", Some("registry+https://github.com/rust-lang/crates.io-index"), json!([
                target("log", &["lib"], "/registry/log/src/lib.rs")
            ])),
            package("cfg-if", "/registry/cfg-if", Some("registry+https://github.com/rust-lang/crates.io-index"), json!([
                target("cfg-if", &["lib"], "/registry/cfg-if/src/lib.rs")
            ])),
            package("derive-helper", "/registry/derive-helper", Some("registry+https://github.com/rust-lang/crates.io-index"), json!([
                target("derive-helper", &["proc-macro"], "/registry/derive-helper/src/lib.rs")
            ]))
        ],
        "workspace_members": [id("/ws/app", "app")],
        "workspace_default_members": [id("/ws/app", "app")],
        "resolve": {
            "nodes": [
                {
                    "id": id("/ws/app", "app"),
                    "dependencies": [id("/ws/testkit", "testkit"), id("/registry/log", "log")],
                    "deps": [],
                    "features": []
                },
                {
                    "id": id("/ws/testkit", "testkit"),
                    "dependencies": [id("/ws/app", "app"), id("/registry/derive-helper", "derive-helper")],
                    "deps": [],
                    "features": []
                },
                {
                    "id": id("/registry/log", "log"),
                    "dependencies": [id("/registry/cfg-if", "cfg-if")],
                    "deps": [],
                    "features": []
                }
            ],
            "root": null
        },
        "target_directory": "/ws/target",
        "version": 1,
        "workspace_root": "/ws",
        "metadata": null
    })
}

fn clean_metadata() -> CleanCargoMetadata {
    let metadata: Metadata =
        serde_json::from_value(cargo_metadata_json()).expect("fixture must be valid cargo metadata");
    CleanCargoMetadata::from_cargo(&metadata)
}

#[test]
fn test_from_cargo_flattens_packages() {
    let clean = clean_metadata();

    check!(clean.packages.len() == 5);
    let app = &clean.packages[0];
    check!(app.name == "app");
    check!(app.is_workspace_member);
    check!(app.source.is_none());
    check!(app.root_url == "file:///ws/app");
    check!(app.targets[0].root_url == "file:///ws/app/src/lib.rs");

    let kinds: Vec<TargetKind> = app.targets.iter().map(|t| t.kind).collect();
    check!(kinds == vec![TargetKind::Lib, TargetKind::Bin, TargetKind::Unknown]);
    check!(clean.packages[4].targets[0].kind == TargetKind::Lib);
    check!(clean.packages[2].source.as_deref() == Some("registry+https://github.com/rust-lang/crates.io-index"));
}

#[test]
fn test_from_cargo_keeps_member_dependencies_only() {
    let clean = clean_metadata();

    check!(clean.dependencies.len() == clean.packages.len());
    check!(clean.dependencies[0].dependencies_indexes == vec![1, 2]);
    check!(clean.dependencies[1].dependencies_indexes.is_empty());
    check!(clean.dependencies[2].dependencies_indexes.is_empty());
}

#[test]
fn test_origins_from_cargo_metadata() {
    let_assert!(Ok(ws) = CargoWorkspace::deserialize(clean_metadata()));
    let origin = |name: &str| ws.find_package(name).unwrap().origin();

    check!(origin("app") == PackageOrigin::Workspace);
    check!(origin("testkit") == PackageOrigin::Dependency);
    check!(origin("log") == PackageOrigin::Dependency);
    check!(origin("cfg-if") == PackageOrigin::TransitiveDependency);
    check!(origin("derive-helper") == PackageOrigin::TransitiveDependency);

    let_assert!(Some(cfg_if) = ws.find_crate_by_name("cfg_if"));
    check!(cfg_if.package().name() == "cfg-if");
}

#[tokio::test]
async fn test_fetch_metadata_for_this_crate() {
    let manifest = project_root().join("Cargo.toml");
    let_assert!(Ok(clean) = fetch_clean_metadata(&manifest).await);
    let_assert!(Ok(ws) = CargoWorkspace::deserialize(clean));

    let_assert!(Some(this) = ws.find_package("cargo-workspace-mcp"));
    check!(this.origin() == PackageOrigin::Workspace);
    check!(this.lib_target().is_some_and(|t| t.norm_name() == "cargo_workspace_mcp"));

    check!(ws.find_package("tokio").is_some_and(|p| p.origin() == PackageOrigin::Dependency));
    check!(ws.find_package("assert2").is_some_and(|p| p.origin() == PackageOrigin::Dependency));
}

#[tokio::test]
async fn test_load_workspace_at_project_root() {
    let root = project_root();
    let_assert!(Ok((loaded_root, ws)) = load_workspace(&root.display().to_string()).await);
    check!(loaded_root == root.canonicalize().unwrap());
    check!(ws.find_crate_by_name("cargo_workspace_mcp").is_some());
}
