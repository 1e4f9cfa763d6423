// shader-core/tests/registry_tests.rs
use shader_core::{ConfigError, ModuleRegistry, RelativePath, ShaderModule, ShaderStage};

fn module(name: &str, source: &str, output: &str) -> ShaderModule {
    ShaderModule::new(name)
        .with_source(RelativePath::source(source).unwrap())
        .with_output(RelativePath::output(output).unwrap())
}

#[test]
fn test_declaration_order_is_preserved() {
    let mut registry = ModuleRegistry::new();
    for name in ["Zeta", "Alpha", "Mid"] {
        registry
            .register(module(name, &format!("{name}.vert"), &format!("{name}.spv")))
            .unwrap();
    }
    let names: Vec<_> = registry.iter().map(ShaderModule::name).collect();
    assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    assert_eq!(registry.len(), 3);
    assert!(!registry.is_empty());
}

#[test]
fn test_duplicate_declare_fails() {
    let mut registry = ModuleRegistry::new();
    registry
        .declare("ApplyVert")
        .unwrap()
        .set_source(RelativePath::source("apply.vert").unwrap());

    let err = registry.declare("ApplyVert").unwrap_err();
    assert_eq!(err, ConfigError::DuplicateModuleName("ApplyVert".to_string()));

    // The original declaration is untouched
    let original = registry.get("ApplyVert").unwrap();
    assert_eq!(original.source().unwrap().segments(), ["apply.vert"]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_duplicate_register_fails() {
    let mut registry = ModuleRegistry::new();
    registry.register(module("A", "a.vert", "a.spv")).unwrap();
    let result = registry.register(module("A", "other.vert", "other.spv"));
    assert!(matches!(result, Err(ConfigError::DuplicateModuleName(name)) if name == "A"));
    assert_eq!(registry.all().len(), 1);
}

#[test]
fn test_validate_reports_first_incomplete_module() {
    let mut registry = ModuleRegistry::new();
    registry.register(module("Good", "good.vert", "good.spv")).unwrap();
    registry.declare("NoSource").unwrap();
    registry.declare("AlsoBroken").unwrap();

    assert_eq!(
        registry.validate(),
        Err(ConfigError::MissingSource("NoSource".to_string()))
    );
}

#[test]
fn test_validate_accepts_complete_registry() {
    let mut registry = ModuleRegistry::new();
    registry
        .register(module("Frag", "blit.frag", "blit.spv").with_stage(ShaderStage::Fragment))
        .unwrap();
    assert!(registry.validate().is_ok());
    assert!(ModuleRegistry::new().validate().is_ok());
}
