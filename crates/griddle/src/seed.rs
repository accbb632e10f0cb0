use griddle_core::config;
use griddle_core::driver::Session;
use griddle_core::fixture::{creation_order, FixtureSet};
use griddle_core::schema::{Registry, TransformContext};
use griddle_core::{Error, Result};
use tracing::debug;

/// What a seeding run did: the resolved creation order and the number of
/// records staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub order: Vec<String>,
    pub records: usize,
}

/// Stages every fixture record in dependency order, then commits once.
///
/// Every table in the resolved order — dependency-only names included —
/// must be backed by a registered model. Value transforms run here, before
/// any persistence.
pub(crate) fn seed_all(
    registry: &Registry,
    session: &mut impl Session,
    fixtures: &FixtureSet,
) -> Result<SeedReport> {
    let order = creation_order(fixtures)?;

    for table in &order {
        if !registry.contains_table(table) {
            return Err(Error::missing_model(table));
        }
    }

    let cx = TransformContext::from_settings(&config::read_settings());

    let mut records = 0;
    for table in &order {
        let Some(fixture) = fixtures.table(table) else {
            continue;
        };
        let model = match registry.by_table(table) {
            Some(model) => model,
            None => return Err(Error::missing_model(table)),
        };

        for values in &fixture.records {
            session.add(model.new_record(values.clone(), &cx)?)?;
            records += 1;
        }
    }

    // one commit finalizes the whole batch
    session.commit()?;

    debug!(tables = order.len(), records, "seeded fixture batch");
    Ok(SeedReport { order, records })
}
