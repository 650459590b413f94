use std::{fs, path::PathBuf};

use bnm_sdkgen::prelude::*;

fn samples() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/samples")
}

fn load() -> ProjectResult {
    ProjectLoader::new()
        .input(samples())
        .unwrap()
        .strict_mode(true)
        .build()
        .unwrap()
}

fn unit<'s>(sdk: &'s Sdk, path: &str) -> &'s str {
    &sdk.units()
        .find(|unit| unit.path == path)
        .unwrap_or_else(|| panic!("no unit at {path}"))
        .text
}

#[test]
fn generate_sample_project() {
    let result = load();
    assert!(result.is_complete_success());
    assert_eq!(result.project.module_count(), 1);

    let config = GeneratorConfig::default();
    let sdk = Generator::new(result.project.registry(), &config).generate();

    let paths: Vec<&str> = sdk.units().map(|unit| unit.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "Game/Actor.h",
            "Game/IDamageable.h",
            "Game/Items/Inventory.h",
            "Game/Items/Item.h",
            "Game/Player.h",
        ]
    );
    assert_eq!(sdk.failure_count(), 0);

    let indices: Vec<&str> = sdk.indices.iter().map(|index| index.path.as_str()).collect();
    assert_eq!(indices, vec!["Game.hpp", "Game/Items.hpp"]);
    assert_eq!(
        sdk.indices[1].text,
        "#pragma once\n\
         // Generated by bnm-sdkgen\n\
         #include <Game/Items/Inventory.h>\n\
         #include <Game/Items/Item.h>\n"
    );
}

#[test]
fn player_unit_contents() {
    let result = load();
    let config = GeneratorConfig::default();
    let sdk = Generator::new(result.project.registry(), &config).generate();
    let player = unit(&sdk, "Game/Player.h");

    // Complete requirements are included, references are forward declared
    assert!(player.contains("#include <Game/Actor.h>\n"));
    assert!(player.contains("#include <BNM/UnityStructures/Vector3.hpp>\n"));
    assert!(player.contains("namespace Game::Items {\n\tclass Inventory;\n}\n"));
    assert!(!player.contains("#include <Game/Items/Inventory.h>"));

    assert!(player.contains("class Player : public ::Game::Actor {\n"));
    assert!(player.contains("enum class State : int {\n"));
    assert!(player.contains("Idle = 0,\n"));
    assert!(player.contains("::Game::Player::State dyn_state()"));
    assert!(player.contains("::Game::Items::Inventory* dyn_inventory()"));
    assert!(player.contains("::BNM::IL2CPP::Il2CppObject* dyn_native()"));
    assert!(player.contains("void Move(::BNM::Structures::Unity::Vector3 direction)"));
    assert!(player.contains("static ::Game::Player* Spawn()"));
    assert!(player.contains("::Game::IDamageable* As_IDamageable()"));
    assert!(!player.contains("op_Equality"));

    assert!(player.contains("Get<::Game::Player*>()"));
    assert!(player.contains("Get<::Game::Player::State>()"));
}

#[test]
fn base_fallback_and_constructors() {
    let result = load();
    let config = GeneratorConfig::default();
    let sdk = Generator::new(result.project.registry(), &config).generate();

    let actor = unit(&sdk, "Game/Actor.h");
    assert!(actor.contains("class Actor : public ::BNM::IL2CPP::Il2CppObject {\n"));
    assert!(actor.contains("static Actor* New_ctor()"));
    assert!(actor.contains("int dyn_health()"));
    assert!(actor.contains("static int dyn_Count()"));
    assert!(!actor.contains(".cctor"));

    let damageable = unit(&sdk, "Game/IDamageable.h");
    assert!(damageable.contains("class IDamageable {\n"));
    assert!(damageable.contains("void Damage(float amount)"));
    assert!(!damageable.contains("New_ctor"));
}

#[test]
fn value_types_degrade_to_opaque() {
    let result = load();
    let config = GeneratorConfig::default();
    let sdk = Generator::new(result.project.registry(), &config).generate();

    let inventory = unit(&sdk, "Game/Items/Inventory.h");
    assert!(inventory.contains("::BNM::Structures::Mono::List<void*>* dyn_items()"));
    assert!(inventory.contains("#include <BNM/BasicMonoStructures.hpp>\n"));

    let item = unit(&sdk, "Game/Items/Item.h");
    assert!(item.contains("struct Item"));
    assert!(!item.contains("dyn_id"));
    assert!(item.contains("template <typename T = void*>\n"));
    assert!(item.contains("static T dyn_Empty()"));
}

#[test]
fn generation_is_deterministic() {
    let result = load();
    let config = GeneratorConfig::default();

    let first = Generator::new(result.project.registry(), &config).generate();
    let second = Generator::new(result.project.registry(), &config).generate();

    let first: Vec<(&str, &str)> = first
        .units()
        .map(|unit| (unit.path.as_str(), unit.text.as_str()))
        .collect();
    let second: Vec<(&str, &str)> = second
        .units()
        .map(|unit| (unit.path.as_str(), unit.text.as_str()))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn compiler_generated_types_are_opt_in() {
    let result = load();
    let config = GeneratorConfig::default().keep_compiler_generated(true);
    let sdk = Generator::new(result.project.registry(), &config).generate();

    assert!(sdk.units().any(|unit| unit.identity == "<Module>"));
    assert_eq!(sdk.unit_count(), 6);
}

#[test]
fn write_sdk_to_disk() {
    let result = load();
    let config = GeneratorConfig::default();
    let sdk = Generator::new(result.project.registry(), &config).generate();

    let dir = tempfile::tempdir().unwrap();
    let writer = OutputWriter::new(dir.path());
    let report = writer.write_sdk(&sdk);
    assert!(report.is_success());
    assert_eq!(report.written, 7);

    let player = fs::read_to_string(dir.path().join("include/Game/Player.h")).unwrap();
    assert_eq!(player, unit(&sdk, "Game/Player.h"));
    assert!(dir.path().join("include/Game/Items.hpp").is_file());
}

#[test]
fn broken_dump_handling() {
    let broken = samples().join("invalid/Broken.json");

    let err = ProjectLoader::new()
        .input(&broken)
        .unwrap()
        .strict_mode(true)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("Duplicate type identity - Game.Twice"));

    let result = ProjectLoader::new()
        .input(samples())
        .unwrap()
        .input(&broken)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(result.success_count(), 1);
    assert_eq!(result.failure_count(), 1);
    assert!(result.has_failures());
}
