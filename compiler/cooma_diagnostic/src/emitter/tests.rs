use super::*;
use crate::ErrorCode;
use cooma_ir::Span;
use pretty_assertions::assert_eq;

fn sample() -> Diagnostic {
    Diagnostic::error(ErrorCode::E6001)
        .with_message("division by zero")
        .with_label(Span::new(14, 19), "division by zero here")
        .with_note("call stack:\n  0: f")
        .with_suggestion("add a zero check before dividing")
}

#[test]
fn render_without_source_uses_byte_spans() {
    let text = render(&sample(), None);
    assert_eq!(
        text,
        "error[E6001]: division by zero\n\
         \x20 --> 14..19: division by zero here\n\
         \x20 = note: call stack:\n  0: f\n\
         \x20 = help: add a zero check before dividing\n"
    );
}

#[test]
fn render_with_source_uses_line_and_column() {
    let source = "let x = 10\nx / 0 + 1";
    let text = render(&sample(), Some(("main.cooma", source)));
    assert!(text.contains("--> main.cooma:2:4: division by zero here"), "{text}");
}

#[test]
fn colors_only_when_enabled() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&sample());
    emitter.flush();
    let text = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    assert!(text.contains("\x1b["));

    let plain = render(&sample(), None);
    assert!(!plain.contains("\x1b["));
}

#[test]
fn emit_all_writes_every_diagnostic() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_all(&[
        Diagnostic::error(ErrorCode::E6020).with_message("unbound variable: x"),
        Diagnostic::error(ErrorCode::E6040).with_message("non-exhaustive match"),
    ]);
    let text = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    assert!(text.contains("[E6020]"));
    assert!(text.contains("[E6040]"));
}

#[test]
fn auto_mode_follows_tty() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
