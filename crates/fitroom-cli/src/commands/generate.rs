//! `fitroom generate` - run one try-on generation end to end.

use anyhow::{Result, bail};
use fitroom_core::encoder::ImageFile;
use fitroom_core::image::Slot;
use fitroom_core::session::{GenerationOrchestrator, Phase};
use fitroom_interaction::GeminiStylist;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run(
    person: PathBuf,
    clothing: PathBuf,
    output: PathBuf,
    model: Option<String>,
) -> Result<()> {
    let stylist = GeminiStylist::try_from_env()?;
    let stylist = match model {
        Some(model) => stylist.with_model(model),
        None => stylist,
    };
    let orchestrator = GenerationOrchestrator::new(Arc::new(stylist));

    // Both slots encode concurrently, as they would behind a UI.
    let person_select = orchestrator.select_image(Slot::Person, ImageFile::new(&person));
    let clothing_select = orchestrator.select_image(Slot::Clothing, ImageFile::new(&clothing));
    person_select.await?;
    clothing_select.await?;

    let session = orchestrator.session().await;
    if let Some(message) = &session.upload_error {
        bail!("{message}");
    }

    orchestrator.generate().await;

    let session = orchestrator.session().await;
    match session.phase {
        Phase::Succeeded => {
            let image = session
                .result
                .ok_or_else(|| anyhow::anyhow!("succeeded session is missing its result"))?;
            tokio::fs::write(&output, &image.bytes).await?;
            println!(
                "Saved try-on image to {} ({}, {} bytes)",
                output.display(),
                image.media_type,
                image.bytes.len()
            );
            Ok(())
        }
        _ => {
            let message = session
                .error_message
                .unwrap_or_else(|| "generation did not complete".to_string());
            bail!("{message}");
        }
    }
}
