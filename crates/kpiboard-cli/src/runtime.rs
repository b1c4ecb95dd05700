// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use kpiboard_app::{Catalogue, MonthlyFigures, monthly_figures};
use tracing::debug;

/// Serves the compiled-in catalogue and chart figures. The catalogue is
/// revalidated on load so a bad record aborts startup instead of rendering.
pub struct StaticRuntime<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> StaticRuntime<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn builtin() -> Self {
        Self::new(Catalogue::builtin())
    }

    pub fn check(&self) -> Result<Catalogue> {
        let catalogue = Catalogue::new(self.catalogue.kpis().to_vec())
            .context("built-in KPI catalogue failed validation")?;
        debug!(
            kpis = catalogue.len(),
            categories = catalogue.categories().len(),
            "catalogue validated"
        );
        Ok(catalogue)
    }
}

impl kpiboard_tui::DashboardRuntime for StaticRuntime<'_> {
    fn load_catalogue(&mut self) -> Result<Catalogue> {
        self.check()
    }

    fn load_monthly_figures(&mut self) -> Result<Vec<MonthlyFigures>> {
        Ok(monthly_figures().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::StaticRuntime;
    use anyhow::Result;
    use kpiboard_testkit::KpiFaker;
    use kpiboard_tui::DashboardRuntime;

    #[test]
    fn builtin_runtime_loads_full_catalogue() -> Result<()> {
        let mut runtime = StaticRuntime::builtin();
        let catalogue = runtime.load_catalogue()?;
        assert_eq!(catalogue.len(), 30);
        assert_eq!(catalogue.categories().len(), 7);
        assert_eq!(runtime.load_monthly_figures()?.len(), 6);
        Ok(())
    }

    #[test]
    fn runtime_serves_the_catalogue_it_was_given() -> Result<()> {
        let mut faker = KpiFaker::new(11);
        let catalogue = faker.catalogue(12)?;
        let mut runtime = StaticRuntime::new(&catalogue);
        assert_eq!(runtime.load_catalogue()?, catalogue);
        Ok(())
    }
}
