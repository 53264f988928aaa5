use std::path::PathBuf;

use anyhow::Context;
use polyround::{init_logging, Config, Editor, HandleKind, Point, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("polyround {} (built {})", VERSION, BUILD_DATE);

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(path.as_deref()).context("loading configuration")?;
    let mut editor = Editor::new(&config).context("creating editor")?;

    // Scripted session: select, round the corners, add vertices, resize,
    // then undo the resize.
    let center = editor.transform().center(editor.params().size);
    let top = editor.transform().top;

    editor.select();
    editor.drag(HandleKind::CornerRadius, Point::new(center.x, top + 20.0));
    editor.release();
    editor.drag(HandleKind::VertexCount, Point::new(center.x + 100.0, center.y - 20.0));
    editor.release();
    editor.drag(HandleKind::BottomRight, Point::new(center.x + 250.0, center.y + 150.0));
    editor.release();

    editor.undo(|caps| {
        tracing::info!(undoable = caps.undoable, redoable = caps.redoable, "undo complete");
    })?;

    tracing::info!(
        num_verts = editor.params().num_verts,
        corner_radius = editor.params().corner_radius,
        history = editor.history().len(),
        "session finished"
    );

    print!("{}", editor.to_svg());
    Ok(())
}
