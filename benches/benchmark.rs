use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use uuid::Uuid;

use acuity::{
    Cardinality, Entity, EntityDataType, EntityModel, EvaluationCriterion, EvaluationItem,
    EvaluationOptions, Evaluator, ItemData, MethodRegistry, ObservationValue, ReferenceBundle,
    Rubric, SamDefinition, ScoringEffect,
};

fn bundle() -> ReferenceBundle {
    let attribute = Entity::new(
        "obx-value",
        "Observation Value",
        EntityDataType::ObservationValue,
        Cardinality::ExactlyOne,
    );
    let element = Entity::new(
        "obx",
        "Observation",
        EntityDataType::Structural,
        Cardinality::ZeroOrMany,
    )
    .with_children(vec![attribute]);
    let class = Entity::new(
        "order",
        "Order",
        EntityDataType::Structural,
        Cardinality::OneOrMany,
    )
    .with_children(vec![element]);
    let root = Entity::new(
        "msg",
        "Message",
        EntityDataType::Structural,
        Cardinality::ExactlyOne,
    )
    .with_children(vec![class]);

    let mut rubric = Rubric::new("bench", "1.0");
    rubric.criteria = vec![
        EvaluationCriterion {
            id: Uuid::new_v4(),
            entity_mnemonic: "obx-value".into(),
            sam_mnemonic: "numeric-value".into(),
            parameters: Vec::new(),
            condition_sam: None,
            condition_parameters: Vec::new(),
            sequence: 1,
            effect: ScoringEffect::Scoring,
            weight: 1,
            is_critical: false,
            name: None,
            description: None,
        },
    ];

    ReferenceBundle::new(rubric, EntityModel::new("2.1", root)).with_definitions([
        SamDefinition::new("value-present"),
        SamDefinition::new("numeric-value").with_prerequisite("value-present"),
    ])
}

fn tree(bundle: &ReferenceBundle, observations: usize) -> EvaluationItem {
    let root_entity = Arc::new(bundle.model.root.clone());
    let class_entity = Arc::new(bundle.model.find("order").unwrap().clone());
    let element_entity = Arc::new(bundle.model.find("obx").unwrap().clone());
    let attribute_entity = Arc::new(bundle.model.find("obx-value").unwrap().clone());

    let mut root = EvaluationItem::root(root_entity);
    let class = root.add_class(class_entity);
    for i in 0..observations {
        let element = class.add_element(Arc::clone(&element_entity));
        element.add_attribute(
            Arc::clone(&attribute_entity),
            Some(ItemData::ObservationValue(ObservationValue {
                value: format!("{}.5", i),
                unit: None,
                reference_range: None,
            })),
        );
    }
    root
}

fn bench_evaluation(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let bundle = bundle();
    let registry = Arc::new(MethodRegistry::with_builtins());
    let evaluator = Evaluator::new(registry);
    let options = EvaluationOptions::default();

    c.bench_function("evaluate 100 observations", |b| {
        b.iter(|| {
            let tree = tree(&bundle, 100);
            let report = runtime
                .block_on(evaluator.evaluate(tree, &bundle, &options))
                .expect("evaluation");
            assert_eq!(report.statistics.message.score(), 100);
        })
    });
}

criterion_group!(benches, bench_evaluation);
criterion_main!(benches);
