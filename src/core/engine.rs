use crate::core::{CatalogReport, Delivery, Pipeline, Stage};
use crate::utils::error::Result;
use crate::utils::monitor::StageMonitor;

#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_written: Option<usize>,
    pub report: Option<CatalogReport>,
    pub delivery: Option<Delivery>,
}

/// Runs fetch, aggregate and notify strictly in order; the first error stops the run.
pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.run_stage(Stage::All).await
    }

    pub async fn run_stage(&self, stage: Stage) -> Result<RunSummary> {
        let mut monitor = StageMonitor::new(self.monitor_enabled);
        let mut summary = RunSummary::default();

        tracing::info!("Starting book report pipeline ({:?})", stage);

        if stage.includes(Stage::Fetch) {
            monitor.stage_started();
            let rows = self.pipeline.fetch().await?;
            monitor.stage_finished("fetch");
            println!("✅ Catalog saved: {} books", rows);
            summary.rows_written = Some(rows);
        }

        if stage.includes(Stage::Aggregate) {
            monitor.stage_started();
            let report = self.pipeline.aggregate().await?;
            monitor.stage_finished("aggregate");
            println!("✅ Report generated: {} books summarized", report.item_count);
            summary.report = Some(report);
        }

        if stage.includes(Stage::Notify) {
            monitor.stage_started();
            let delivery = self.pipeline.notify().await?;
            monitor.stage_finished("notify");
            match &delivery {
                Delivery::Sent => println!("✅ Email sent through the mail relay."),
                Delivery::RelayUnavailable { relay } => println!(
                    "❌ Could not connect to the SMTP relay at {}. Check that the local mail relay is running.",
                    relay
                ),
            }
            summary.delivery = Some(delivery);
        }

        monitor.log_final_stats();
        Ok(summary)
    }
}
