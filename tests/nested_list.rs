//! Reimplements a small structured-data printer (lists of ints, strings, and nested lists) on
//! top of the block combinators, exercising the optimizer end to end the way a real caller
//! would: building a tree once and letting `Options` drive where it breaks.

use std::rc::Rc;

use blockprint::block::{Block, ChoiceBlock, LineBlock, StackBlock, TextBlock};
use blockprint::Options;

enum Data {
    Int(i64),
    Str(&'static str),
    List(Vec<Data>),
}

fn py_repr(data: &Data) -> String {
    match data {
        Data::Int(n) => n.to_string(),
        Data::Str(s) => format!("'{s}'"),
        Data::List(_) => unreachable!("lists are never rendered through py_repr"),
    }
}

fn build(data: &Data, current: Rc<dyn Block>) -> Rc<dyn Block> {
    match data {
        Data::List(items) => {
            let block_choice = format_block(items, Rc::clone(&current));
            let line_choice = format_line(items, current);
            Rc::new(ChoiceBlock::new(vec![block_choice, line_choice]).unwrap())
        }
        leaf => Rc::new(
            LineBlock::new(vec![current, Rc::new(TextBlock::new(py_repr(leaf)))]).unwrap(),
        ),
    }
}

/// One item per line, indented by two spaces.
fn format_block(items: &[Data], current: Rc<dyn Block>) -> Rc<dyn Block> {
    let first_line: Rc<dyn Block> =
        Rc::new(LineBlock::new(vec![current, Rc::new(TextBlock::new("["))]).unwrap());

    let mut lines: Vec<Rc<dyn Block>> = vec![first_line];
    for item in items {
        let blank: Rc<dyn Block> = Rc::new(TextBlock::new(""));
        lines.push(Rc::new(
            LineBlock::new(vec![
                Rc::new(TextBlock::new("  ")),
                build(item, blank),
                Rc::new(TextBlock::new(", ")),
            ])
            .unwrap(),
        ));
    }
    lines.push(Rc::new(TextBlock::new("]")));

    Rc::new(StackBlock::new(lines).unwrap())
}

/// Everything on one unbroken line.
fn format_line(items: &[Data], current: Rc<dyn Block>) -> Rc<dyn Block> {
    let mut current: Rc<dyn Block> =
        Rc::new(LineBlock::new(vec![current, Rc::new(TextBlock::new("["))]).unwrap());

    let n = items.len();
    for (i, item) in items.iter().enumerate() {
        let built = build(item, Rc::clone(&current));
        current = if i + 1 == n {
            Rc::new(LineBlock::new(vec![built]).unwrap())
        } else {
            Rc::new(LineBlock::new(vec![built, Rc::new(TextBlock::new(", "))]).unwrap())
        };
    }

    Rc::new(LineBlock::new(vec![current, Rc::new(TextBlock::new("]"))]).unwrap())
}

fn format_list_of_lists(data: &Data, margin_0: u32, margin_1: u32) -> String {
    let root = build(data, Rc::new(TextBlock::new("")));
    let options = Options::new().with_margin_0(margin_0).with_margin_1(margin_1);
    root.render(&options).unwrap()
}

#[test]
fn nested_lists_break_only_where_they_must() {
    let data = Data::List(vec![
        Data::Int(123),
        Data::Int(456),
        Data::Int(789),
        Data::Int(123),
        Data::List(vec![
            Data::Str("a"),
            Data::List(vec![
                Data::Int(543),
                Data::Int(5432),
                Data::Int(5432),
                Data::Int(432),
                Data::Int(432),
                Data::Int(432),
                Data::Int(543),
                Data::Int(432),
                Data::Int(432),
                Data::Int(432),
            ]),
            Data::Str("c"),
            Data::Str("d"),
            Data::List(vec![
                Data::Int(123),
                Data::Int(5432),
                Data::Int(765432),
                Data::Int(6543),
            ]),
        ]),
    ]);

    let expected = concat!(
        "[123, 456, 789, 123, [\n",
        "  'a', \n",
        "  [543, 5432, 5432, 432, 432, 432, 543, 432, 432, 432], \n",
        "  'c', \n",
        "  'd', \n",
        "  [123, 5432, 765432, 6543], \n",
        "]]",
    );

    assert_eq!(format_list_of_lists(&data, 10, 60), expected);
}
