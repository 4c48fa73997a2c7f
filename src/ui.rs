// Minimal form: two date fields, one button per analysis, one output label.

use crate::dispatcher::command::AnalysisKind;
use crate::dispatcher::{CommandDispatcher, render_error};
use crate::fetcher::MarketDataFetcher;
use chrono::{Months, Utc};
use eframe::egui;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::info;

struct AnalysisForm<F> {
    dispatcher: Arc<CommandDispatcher<F>>,
    runtime: Runtime,
    start: String,
    end: String,
    output: String,
    pending: bool,
    reply_tx: Sender<String>,
    reply_rx: Receiver<String>,
}

impl<F: MarketDataFetcher + 'static> AnalysisForm<F> {
    fn new(dispatcher: CommandDispatcher<F>, runtime: Runtime) -> Self {
        let today = Utc::now().date_naive();
        let year_ago = today.checked_sub_months(Months::new(12)).unwrap_or(today);
        let (reply_tx, reply_rx) = mpsc::channel();
        Self {
            dispatcher: Arc::new(dispatcher),
            runtime,
            start: year_ago.to_string(),
            end: today.to_string(),
            output: String::new(),
            pending: false,
            reply_tx,
            reply_rx,
        }
    }

    fn submit(&mut self, kind: AnalysisKind, ctx: egui::Context) {
        let line = format!("{} {} {}", kind.keyword(), self.start.trim(), self.end.trim());
        let dispatcher = Arc::clone(&self.dispatcher);
        let reply_tx = self.reply_tx.clone();
        self.pending = true;

        self.runtime.spawn(async move {
            let text = match dispatcher.dispatch(&line).await {
                Ok(reply) => reply.text().unwrap_or_default().to_string(),
                Err(e) => render_error(&e),
            };
            let _ = reply_tx.send(text);
            ctx.request_repaint();
        });
    }
}

fn button_label(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::Trend => "Downward trend",
        AnalysisKind::Highest => "Highest volume",
        AnalysisKind::BestDay => "Best days",
    }
}

impl<F: MarketDataFetcher + 'static> eframe::App for AnalysisForm<F> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(text) = self.reply_rx.try_recv() {
            self.output = text;
            self.pending = false;
        }

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Start date");
                ui.text_edit_singleline(&mut self.start);
            });
            ui.horizontal(|ui| {
                ui.label("End date");
                ui.text_edit_singleline(&mut self.end);
            });
            ui.horizontal(|ui| {
                for kind in AnalysisKind::ALL {
                    if ui.add_enabled(!self.pending, egui::Button::new(button_label(kind))).clicked() {
                        clicked = Some(kind);
                    }
                }
            });
            ui.separator();
            if self.pending {
                ui.spinner();
            } else {
                ui.label(self.output.as_str());
            }
        });

        if let Some(kind) = clicked {
            self.submit(kind, ctx.clone());
        }
        if self.pending {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}

/// Runs the form until its window closes. Queries execute on a background runtime.
pub fn launch<F: MarketDataFetcher + 'static>(
    dispatcher: CommandDispatcher<F>,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let form = AnalysisForm::new(dispatcher, runtime);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 200.0]),
        ..Default::default()
    };
    info!("Launching analysis form");
    eframe::run_native("coin-trend", options, Box::new(move |_cc| Ok(Box::new(form))))?;
    Ok(())
}
