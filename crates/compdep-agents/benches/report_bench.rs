use std::hint::black_box;

use compdep_agents::DependencyViewerAgent;
use compdep_core::class::DependencyDeclaration;
use compdep_core::construction::{ComponentTemplate, ConstructionNode, InheritedOverride};
use compdep_core::dependency::ComponentDependency;
use compdep_data::{BlueprintDefinition, ClassDefinition, Project, ProjectDefinition};
use criterion::{criterion_group, criterion_main, Criterion};

fn class(name: &str, parent: &str, dependencies: Option<DependencyDeclaration>) -> ClassDefinition {
    ClassDefinition {
        name: name.into(),
        parent: parent.into(),
        kind: Default::default(),
        implements: Vec::new(),
        dependencies,
        default_components: Vec::new(),
    }
}

/// 500 base blueprints deriving from Character, each with a derived variant
/// that overrides the weapon's tags.
fn universe() -> Project {
    let classes = vec![
        class(
            "WeaponComponent",
            "SceneComponent",
            Some(DependencyDeclaration::Override(vec![
                ComponentDependency::child("StaticMeshComponent"),
                ComponentDependency::child_with_tag("ArrowComponent", "muzzle"),
                ComponentDependency::any_on_actor_with_tag("SkeletalMeshComponent", "body").optional(),
            ])),
        ),
        class(
            "AmmoComponent",
            "ActorComponent",
            Some(DependencyDeclaration::Override(vec![
                ComponentDependency::any_on_actor("WeaponComponent"),
            ])),
        ),
    ];

    let mut blueprints = Vec::new();
    for i in 0..500 {
        let base = format!("BP_Soldier{i}_C");
        let mut script = vec![
            ConstructionNode::new(ComponentTemplate::new("Weapon", "WeaponComponent"))
                .attached_to("CharacterMesh0"),
            ConstructionNode::new(ComponentTemplate::new("Ammo", "AmmoComponent")),
        ];
        if i % 2 == 0 {
            script.push(
                ConstructionNode::new(ComponentTemplate::new("Barrel", "StaticMeshComponent"))
                    .attached_to("Weapon"),
            );
        }
        blueprints.push(BlueprintDefinition {
            name: base.as_str().into(),
            parent: "Character".into(),
            native_overrides: Vec::new(),
            construction_script: script,
            inherited_overrides: Vec::new(),
        });
        blueprints.push(BlueprintDefinition {
            name: format!("BP_Veteran{i}_C").into(),
            parent: base.as_str().into(),
            native_overrides: Vec::new(),
            construction_script: Vec::new(),
            inherited_overrides: vec![InheritedOverride {
                owner: base.as_str().into(),
                template: ComponentTemplate::new("Weapon", "WeaponComponent").with_tag("veteran"),
            }],
        });
    }

    Project::from_definition(ProjectDefinition { classes, blueprints })
        .expect("synthetic universe is valid")
}

fn bench_report(c: &mut Criterion) {
    let project = universe();
    let agent = DependencyViewerAgent::new();

    let mut group = c.benchmark_group("Dependency Report");

    group.bench_function("Full scan (1000 blueprints)", |b| {
        b.iter(|| {
            let reports = agent.query_blueprints(project.registry(), project.blueprints(), "", false);
            black_box(reports);
        });
    });

    group.bench_function("Only unfulfilled, filtered", |b| {
        b.iter(|| {
            let reports =
                agent.query_blueprints(project.registry(), project.blueprints(), "veteran", true);
            black_box(reports);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_report);
criterion_main!(benches);
