//! Property tests for the line editor

use proptest::prelude::*;

use uart_line_editor::editor::LineEditor;
use uart_line_editor::hal::sim::SimUart;
use uart_line_editor::LINE_CAPACITY;

/// Bytes that are stored and echoed as-is.
fn printable() -> impl Strategy<Value = u8> {
    0x20u8..0x7F
}

fn any_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        4 => printable(),
        1 => Just(b'\r'),
        1 => Just(0x08u8),
        1 => Just(0x7Fu8),
    ]
}

fn feed(uart: &mut SimUart, editor: &mut LineEditor<'_>, input: &[u8]) {
    for &b in input {
        uart.inject_byte(b);
        uart.run_until_idle(editor).expect("line never went idle");
    }
}

proptest! {
    #[test]
    fn short_line_echoes_exactly(line in prop::collection::vec(printable(), 0..LINE_CAPACITY - 1)) {
        let mut uart = SimUart::new();
        let mut editor: LineEditor<'_> = LineEditor::new();

        let mut input = line.clone();
        input.push(b'\r');
        feed(&mut uart, &mut editor, &input);

        let mut expected = line.clone();
        expected.extend_from_slice(b"\r\n");
        prop_assert_eq!(uart.wire(), &expected[..]);
        prop_assert_eq!(editor.line_index(), 0);
        prop_assert_eq!(editor.line().terminated(), &line[..]);
    }

    #[test]
    fn type_then_erase_is_net_zero(
        prefix in prop::collection::vec(printable(), 0..LINE_CAPACITY - 2),
        c in printable(),
        erase in prop_oneof![Just(0x08u8), Just(0x7Fu8)],
    ) {
        let mut uart = SimUart::new();
        let mut editor: LineEditor<'_> = LineEditor::new();
        feed(&mut uart, &mut editor, &prefix);
        let before = editor.line_index();
        uart.clear_wire();

        feed(&mut uart, &mut editor, &[c, erase]);

        prop_assert_eq!(editor.line_index(), before);
        prop_assert_eq!(uart.wire(), &[c, 0x08, b' ', 0x08][..]);
    }

    #[test]
    fn erase_on_empty_line_is_idempotent(count in 1usize..3 * LINE_CAPACITY) {
        let mut uart = SimUart::new();
        let mut editor: LineEditor<'_> = LineEditor::new();

        feed(&mut uart, &mut editor, &vec![0x08; count]);

        prop_assert!(uart.wire().is_empty());
        prop_assert_eq!(editor.line_index(), 0);
    }

    #[test]
    fn overflow_is_idempotent(extra in prop::collection::vec(printable(), 1..40)) {
        let mut uart = SimUart::new();
        let mut editor: LineEditor<'_> = LineEditor::new();
        feed(&mut uart, &mut editor, &vec![b'a'; LINE_CAPACITY - 1]);
        uart.clear_wire();

        feed(&mut uart, &mut editor, &extra);

        prop_assert!(uart.wire().is_empty());
        prop_assert_eq!(editor.line_index(), LINE_CAPACITY - 1);
    }

    #[test]
    fn enter_always_resets(
        input in prop::collection::vec(any_byte(), 0..200),
        next in printable(),
    ) {
        let mut uart = SimUart::new();
        let mut editor: LineEditor<'_> = LineEditor::new();
        feed(&mut uart, &mut editor, &input);

        feed(&mut uart, &mut editor, b"\r");
        prop_assert_eq!(editor.line_index(), 0);

        feed(&mut uart, &mut editor, &[next]);
        prop_assert_eq!(editor.line().as_bytes(), &[next][..]);
    }

    #[test]
    fn burst_matches_slow_typing(input in prop::collection::vec(any_byte(), 0..100)) {
        let mut slow_uart = SimUart::new();
        let mut slow: LineEditor<'_> = LineEditor::new();
        feed(&mut slow_uart, &mut slow, &input);

        let mut burst_uart = SimUart::new();
        let mut burst: LineEditor<'_> = LineEditor::new();
        burst_uart.inject(&input);
        prop_assert!(burst_uart.run_until_idle(&mut burst).is_some());

        prop_assert_eq!(burst_uart.wire(), slow_uart.wire());
        prop_assert_eq!(burst.line().as_bytes(), slow.line().as_bytes());
        prop_assert_eq!(burst_uart.violations(), 0);
        prop_assert!(!burst_uart.tx_interrupt_enabled());
    }

    #[test]
    fn index_stays_in_bounds(input in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut uart = SimUart::new();
        let mut editor: LineEditor<'_> = LineEditor::new();

        for &b in &input {
            uart.inject_byte(b);
            uart.run_until_idle(&mut editor).expect("line never went idle");
            prop_assert!(editor.line_index() <= LINE_CAPACITY - 1);
            prop_assert!(editor.tx_idle());
            prop_assert!(!uart.tx_interrupt_enabled());
        }
    }
}
