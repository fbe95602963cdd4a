//! HanTa, the Hanover tagger, driven through an embedded Python interpreter.
use async_trait::async_trait;
use pyo3::prelude::*;
use tokio::sync::{mpsc, oneshot};
use tokio::task;

use super::{AnalyzedLemma, Tagger};

pub const GERMAN_MODEL: &str = "morphmodel_ger.pgz";

type Request = (String, oneshot::Sender<anyhow::Result<AnalyzedLemma>>);

/// All Python calls happen on one blocking thread; async callers talk to it
/// over a channel.
pub struct HanoverTagger {
    _handle: task::JoinHandle<anyhow::Result<()>>,
    tx: mpsc::UnboundedSender<Request>,
}

impl HanoverTagger {
    pub async fn init(model: impl Into<String>) -> anyhow::Result<Self> {
        let model = model.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<Request>();
        let (init_tx, init_rx) = oneshot::channel::<anyhow::Result<()>>();

        let _handle = task::spawn_blocking(move || {
            Python::with_gil(|py| -> anyhow::Result<()> {
                let tagger = match load_tagger(py, &model) {
                    Ok(tagger) => {
                        let _ = init_tx.send(Ok(()));
                        tagger
                    }
                    Err(err) => {
                        let _ = init_tx.send(Err(err.into()));
                        return Ok(());
                    }
                };
                log::info!("HanTa loaded with model {model}");
                loop {
                    match py.allow_threads(|| rx.blocking_recv()) {
                        Some((word, res_tx)) => {
                            let analyzed = tagger
                                .call_method1("analyze", (word.as_str(),))
                                .and_then(|res| res.extract::<(String, String)>())
                                .map(|(lemma, tag)| AnalyzedLemma::new(lemma, tag))
                                .map_err(anyhow::Error::from);
                            let _ = res_tx.send(analyzed);
                        }
                        None => return Ok(()),
                    }
                }
            })
        });

        init_rx.await??;
        Ok(Self { _handle, tx })
    }
}

fn load_tagger<'py>(py: Python<'py>, model: &str) -> PyResult<Bound<'py, PyAny>> {
    py.import_bound("HanTa.HanoverTagger")?
        .getattr("HanoverTagger")?
        .call1((model,))
}

#[async_trait]
impl Tagger for HanoverTagger {
    async fn analyze(&self, word: &str) -> anyhow::Result<AnalyzedLemma> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send((word.to_string(), tx))
            .map_err(|_| anyhow::anyhow!("HanTa thread has stopped"))?;
        rx.await?
    }
}
