use std::rc::Rc;
use std::sync::Arc;

use room_layout::logging::MemorySink;
use room_layout::text::wrap;
use room_layout::{
    Border, BorderCharset, FixedTerminal, LayoutConfig, LayoutTree, Length, LogLevel, Logger,
    Overflow, OverlayProps, Signal, Spacing, StackProps, Style, TextStyle, Unit,
};
use serde_json::json;

fn plain() -> Rc<Style> {
    Rc::new(Style::default())
}

#[test]
fn row_with_gap_uses_nine_of_ten_columns() {
    let mut tree = LayoutTree::new(FixedTerminal::new(40, 10));
    let a = tree.styled(Unit::cells(4), Unit::cells(1), "aaaa", plain());
    let b = tree.styled(Unit::cells(4), Unit::cells(1), "bbbb", plain());
    let row = tree
        .hstack(
            Unit::cells(10),
            Unit::cells(1),
            StackProps::new()
                .with_gap(Length::Cells(1))
                .with_align_x(Length::END),
            &[a, b],
        )
        .unwrap();
    tree.draw(row).unwrap();

    assert_eq!(tree.node(row).unwrap().used_width(), 9);
    assert_eq!(tree.lines(row).unwrap(), [" aaaa bbbb"]);
}

#[test]
fn overlay_centers_a_single_cell() {
    let mut tree = LayoutTree::new(FixedTerminal::new(40, 10));
    let bg = tree.styled(Unit::cells(5), Unit::cells(3), "", plain());
    let fg = tree.text("X", plain());
    let overlay = tree
        .overlay(
            Unit::Auto,
            Unit::Auto,
            OverlayProps::new(Length::Percent(50.0), Length::Percent(50.0)),
            bg,
            fg,
        )
        .unwrap();
    tree.draw(overlay).unwrap();

    assert_eq!(tree.lines(overlay).unwrap(), ["     ", "  X  ", "     "]);
}

#[test]
fn popup_over_full_screen_background() {
    let mut tree = LayoutTree::new(FixedTerminal::new(12, 5));
    let shade = vec!["............"; 5].join("\n");
    let bg = tree.styled(Unit::percent(100.0), Unit::percent(100.0), shade, plain());
    let popup = Style::new().with_border(Border::all(BorderCharset::SHARP, Border::plain()));
    let fg = tree.styled(Unit::percent(50.0), Unit::Auto, "hi", Rc::new(popup));
    let screen = tree
        .overlay(Unit::Auto, Unit::Auto, OverlayProps::centered(), bg, fg)
        .unwrap();
    tree.draw(screen).unwrap();

    assert_eq!(
        tree.lines(screen).unwrap(),
        ["............", "...┌────┐...", "...│hi  │...", "...└────┘...", "............"]
    );
}

#[test]
fn wrap_breaks_between_words() {
    assert_eq!(wrap(&["one two three"], 7), ["one two", "three"]);
}

#[test]
fn ellipsis_marks_cut_text() {
    let mut tree = LayoutTree::new(FixedTerminal::new(40, 10));
    let style = Style::new().with_text(TextStyle::default().with_overflow(Overflow::ellipsis()));
    let leaf = tree.styled(Unit::cells(4), Unit::cells(1), "abcdef", Rc::new(style));
    tree.draw(leaf).unwrap();
    assert_eq!(tree.lines(leaf).unwrap(), ["abc…"]);
}

fn panel(tree: &mut LayoutTree, title: &str, body: &str) -> room_layout::NodeId {
    let frame = Style::new()
        .with_border(Border::all(BorderCharset::ROUNDED, Border::plain()))
        .with_padding(Spacing::xy(1, 0));
    let title = tree.text(title, plain());
    let body = tree.text(body, Rc::new(frame));
    tree.vstack(Unit::Auto, Unit::Auto, StackProps::new(), &[title, body])
        .unwrap()
}

#[test]
fn dashboard_redraws_only_what_changed() {
    let mut tree = LayoutTree::new(FixedTerminal::new(60, 20));
    let status = Signal::new("ok".to_string());

    let left = panel(&mut tree, "cpu", "12%");
    let right = panel(&mut tree, "mem", "3.1G");
    let footer = tree.text("", plain());
    tree.bind_content(footer, status.clone()).unwrap();

    let row = tree
        .hstack(
            Unit::Auto,
            Unit::Auto,
            StackProps::new().with_gap(Length::Cells(2)),
            &[left, right],
        )
        .unwrap();
    let root = tree
        .vstack(Unit::percent(100.0), Unit::Auto, StackProps::new(), &[row, footer])
        .unwrap();

    tree.draw(root).unwrap();
    assert_eq!(
        tree.lines(root).unwrap()[..4]
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>(),
        ["cpu      mem", "╭─────╮  ╭──────╮", "│ 12% │  │ 3.1G │", "╰─────╯  ╰──────╯"]
    );
    assert_eq!(tree.lines(root).unwrap()[4].trim_end(), "ok");

    tree.draw(root).unwrap();
    assert_eq!(tree.last_pass().laid_out, 0);

    status.set("degraded".to_string());
    tree.draw(root).unwrap();
    assert_eq!(tree.lines(root).unwrap()[4].trim_end(), "degraded");
    // root and the footer; the panel row is reused
    assert_eq!(tree.last_pass().laid_out, 2);
}

#[test]
fn terminal_resize_reflows_relative_sizes() {
    let terminal = FixedTerminal::new(20, 5);
    let sink = Arc::new(MemorySink::new());
    let config = LayoutConfig::default()
        .with_logger(Logger::from_shared(sink.clone()))
        .with_min_level(LogLevel::Debug);
    let mut tree = LayoutTree::with_config(terminal.clone(), config);

    let half = tree.styled(Unit::percent(50.0), Unit::cells(1), "", plain());
    tree.draw(half).unwrap();
    assert_eq!(tree.node(half).unwrap().computed().width, 10);

    terminal.resize(30, 5);
    tree.draw(half).unwrap();
    assert_eq!(tree.node(half).unwrap().computed().width, 15);

    let resized = sink.find("terminal.resized");
    assert_eq!(resized.len(), 1);
    assert_eq!(resized[0].field("width"), Some(&json!(30)));

    let mounted = sink.find("node.mounted");
    assert_eq!(mounted.len(), 1);
    assert_eq!(mounted[0].field("kind"), Some(&json!("styled")));
    assert!(sink.find("draw.pass").is_empty());
}

#[test]
fn metrics_count_passes_and_mounts() {
    let mut tree = LayoutTree::new(FixedTerminal::new(20, 5));
    let metrics = tree.config_mut().enable_metrics();

    let text = tree.text("hello", plain());
    tree.draw(text).unwrap();
    tree.draw(text).unwrap();

    let snapshot = metrics
        .lock()
        .unwrap()
        .snapshot(std::time::Duration::from_millis(5));
    assert_eq!(snapshot.passes, 2);
    assert_eq!(snapshot.mounts, 1);
    assert_eq!(snapshot.nodes_laid_out, 1);
    assert_eq!(snapshot.subtrees_skipped, 1);
}
