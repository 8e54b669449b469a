//! End-to-end checks of the prediction core: feature batches, model calls,
//! aggregation and recommendations.

use std::sync::Arc;

use mockall::{mock, predicate::always};
use proptest::prelude::*;
use rstest::rstest;

use solar_yield_predictor::domain::{PlantId, SiteLabel, WeatherSample};
use solar_yield_predictor::forecast::{
    aggregate, classify, FeatureBatch, FeatureFrameBuilder, PredictionEngine, Recommendation,
    RecommendationPolicy,
};
use solar_yield_predictor::ml::{ModelArtifact, ModelHandle, ModelMetadata, ModelType, Regressor};
use solar_yield_predictor::PredictionError;

mock! {
    pub Model {}

    impl Regressor for Model {
        fn predict(&self, batch: &FeatureBatch) -> anyhow::Result<Vec<f64>>;
        fn metadata(&self) -> &ModelMetadata;
    }
}

fn engine_returning(values: Vec<f64>) -> PredictionEngine {
    let mut model = MockModel::new();
    model
        .expect_predict()
        .with(always())
        .times(1)
        .returning(move |_| Ok(values.clone()));
    model
        .expect_metadata()
        .return_const(ModelMetadata::new("mock", ModelType::LinearRegression));
    PredictionEngine::new(ModelHandle::ready(Arc::new(model)))
}

#[test]
fn boundary_irradiation_is_not_high_viability() {
    let weather = WeatherSample::new(32.0, 50.0, 0.8, None).at(12, 0);
    let result = engine_returning(vec![4000.0, 5000.0])
        .predict_comparative(&weather)
        .unwrap();

    assert_eq!(result.outcome.power(PlantId::PlantA), Some(4000.0));
    assert_eq!(result.outcome.power(PlantId::PlantB), Some(5000.0));
    assert_eq!(result.outcome.total, 9000.0);
    assert_eq!(result.recommendation, Recommendation::Standard);
    assert_eq!(result.sites[0].label, SiteLabel::Conservative);
    assert_eq!(result.sites[1].label, SiteLabel::Optimized);
}

#[test]
fn summed_view_ignores_irradiation_for_high_output() {
    let weather = WeatherSample::new(32.0, 50.0, 0.8, None);
    let result = engine_returning(vec![4000.0, 5000.0])
        .predict_summed(&weather)
        .unwrap();

    assert_eq!(result.recommendation, Recommendation::HighViability);
}

#[test]
fn model_sees_rows_in_plant_order() {
    let mut model = MockModel::new();
    model
        .expect_predict()
        .withf(|batch: &FeatureBatch| {
            batch.plants() == vec![PlantId::PlantA, PlantId::PlantB]
                && batch.rows()[0].plant_code() == 0
                && batch.rows()[1].plant_code() == 1
        })
        .times(1)
        .returning(|_| Ok(vec![-5.0, 10.0]));
    model
        .expect_metadata()
        .return_const(ModelMetadata::new("mock", ModelType::LinearRegression));

    let engine = PredictionEngine::new(ModelHandle::ready(Arc::new(model)));
    let weather = WeatherSample::new(30.0, 45.0, 0.5, None);
    let result = engine.predict_summed(&weather).unwrap();

    assert_eq!(result.outcome.power(PlantId::PlantA), Some(0.0));
    assert_eq!(result.outcome.total, 10.0);
    assert_eq!(result.outcome.clamped, vec![PlantId::PlantA]);
}

#[test]
fn regressor_failure_is_model_unavailable() {
    let mut model = MockModel::new();
    model
        .expect_predict()
        .returning(|_| Err(anyhow::anyhow!("shape (2, 5) does not match (2, 6)")));
    model
        .expect_metadata()
        .return_const(ModelMetadata::new("mock", ModelType::LinearRegression));

    let engine = PredictionEngine::new(ModelHandle::ready(Arc::new(model)));
    let weather = WeatherSample::new(30.0, 45.0, 0.5, None);
    let err = engine.predict_single(&weather, PlantId::PlantA).unwrap_err();

    assert!(matches!(err, PredictionError::ModelUnavailable(_)));
    assert!(err.to_string().contains("does not match"));
}

#[test]
fn wrong_output_length_is_schema_mismatch() {
    let weather = WeatherSample::new(30.0, 45.0, 0.5, None);
    let err = engine_returning(vec![1.0])
        .predict_summed(&weather)
        .unwrap_err();
    assert!(matches!(err, PredictionError::SchemaMismatch(_)));
}

#[rstest]
#[case(WeatherSample::new(19.9, 45.0, 0.5, None))]
#[case(WeatherSample::new(30.0, 75.1, 0.5, None))]
#[case(WeatherSample::new(30.0, 45.0, -0.1, None))]
#[case(WeatherSample::new(30.0, 45.0, 0.5, None).at(12, 60))]
#[case(WeatherSample::new(f64::NAN, 45.0, 0.5, None))]
fn out_of_domain_never_reaches_model(#[case] weather: WeatherSample) {
    let mut model = MockModel::new();
    model.expect_predict().never();
    let engine = PredictionEngine::new(ModelHandle::ready(Arc::new(model)));

    let err = engine.predict_single(&weather, PlantId::PlantA).unwrap_err();
    assert!(matches!(err, PredictionError::Validation(_)));
}

#[test]
fn bundled_artifact_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/solar_model.json");
    let artifact = ModelArtifact::load(path).unwrap();
    assert_eq!(artifact.metadata.model_type, ModelType::LinearRegression);

    let engine = PredictionEngine::new(ModelHandle::load(path));
    assert!(engine.model().is_available());

    let weather = WeatherSample::new(30.0, 45.0, 0.0, None);
    let night = engine.predict_single(&weather, PlantId::PlantA).unwrap();
    assert_eq!(night.recommendation, Recommendation::Night);
    assert!(night.power >= 0.0);
}

#[test]
fn classify_examples() {
    assert_eq!(
        classify(RecommendationPolicy::Comparative, 0.9, 9000.0).unwrap(),
        Recommendation::HighViability
    );
    assert_eq!(
        classify(RecommendationPolicy::Summed, 0.9, 9000.0).unwrap(),
        Recommendation::HighViability
    );
    assert_eq!(
        classify(RecommendationPolicy::Summed, 0.15, 500.0).unwrap(),
        Recommendation::StorageRequired
    );
}

fn weather_strategy() -> impl Strategy<Value = WeatherSample> {
    (20.0..=45.0f64, 20.0..=75.0f64, 0.0..=1.2f64, 0u32..24, 0u32..60).prop_map(
        |(ambient, module, irradiation, hour, minute)| {
            WeatherSample::new(ambient, module, irradiation, None).at(hour, minute)
        },
    )
}

fn plant_selection() -> impl Strategy<Value = Vec<PlantId>> {
    prop::collection::vec(prop::sample::select(PlantId::all()), 1..5)
}

proptest! {
    #[test]
    fn rows_always_in_code_order(weather in weather_strategy(), plants in plant_selection()) {
        let batch = FeatureFrameBuilder::new().build(&weather, plants.clone()).unwrap();

        let mut expected = plants;
        expected.sort();
        expected.dedup();
        prop_assert_eq!(batch.plants(), expected);

        for row in batch.rows() {
            prop_assert_eq!(row.hour, weather.hour);
            prop_assert_eq!(row.minute, weather.minute);
            prop_assert_eq!(row.irradiation, weather.irradiation);
        }
    }

    #[test]
    fn total_is_sum_of_clamped(a in -5000.0..15000.0f64, b in -5000.0..15000.0f64) {
        let outcome = aggregate(&[a, b], &[PlantId::PlantA, PlantId::PlantB]).unwrap();

        prop_assert_eq!(outcome.total, outcome.per_plant.values().sum::<f64>());
        prop_assert!(outcome.per_plant.values().all(|v| *v >= 0.0));
        prop_assert_eq!(outcome.power(PlantId::PlantA), Some(a.max(0.0)));
    }

    #[test]
    fn nonnegative_predictions_unchanged(a in 0.0..15000.0f64, b in 0.0..15000.0f64) {
        let outcome = aggregate(&[a, b], &[PlantId::PlantA, PlantId::PlantB]).unwrap();
        prop_assert_eq!(outcome.power(PlantId::PlantA), Some(a));
        prop_assert_eq!(outcome.power(PlantId::PlantB), Some(b));
        prop_assert!(outcome.clamped.is_empty());
    }

    #[test]
    fn zero_irradiation_is_always_night(total in -1.0e6..1.0e6f64) {
        for policy in [RecommendationPolicy::Single, RecommendationPolicy::Summed, RecommendationPolicy::Comparative] {
            prop_assert_eq!(classify(policy, 0.0, total).unwrap(), Recommendation::Night);
        }
    }
}
