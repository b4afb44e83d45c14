use std::path::PathBuf;

use anyhow::Context;
use rfd::AsyncFileDialog;

/// Save-as flow for a fetched document: prompt for a destination
/// (pre-filled with the timestamped name) and write the bytes out.
/// `Ok(None)` means the user dismissed the dialog.
pub async fn save_document(
    bytes: Vec<u8>,
    suggested_name: String,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(handle) = AsyncFileDialog::new()
        .set_file_name(&suggested_name)
        .add_filter("PDF document", &["pdf"])
        .save_file()
        .await
    else {
        return Ok(None);
    };
    let path = handle.path().to_path_buf();
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(Some(path))
}

/// Native yes/no prompt gating every state-changing submission.
pub async fn confirm(title: &str, prompt: String) -> bool {
    let result = rfd::AsyncMessageDialog::new()
        .set_title(title)
        .set_description(prompt)
        .set_level(rfd::MessageLevel::Warning)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show()
        .await;
    matches!(result, rfd::MessageDialogResult::Yes)
}
