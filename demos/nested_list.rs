//! Pretty-prints a small nested list of numbers and strings under two different margins, to
//! show how the cost model decides where to break.

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

fn sample() -> Data {
    Data::List(vec![
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
            ]),
            Data::Str("c"),
        ]),
    ])
}

fn main() {
    let root = build(&sample(), Rc::new(TextBlock::new("")));

    println!("-- margin_1 = 60 --");
    let wide = Options::new().with_margin_0(10).with_margin_1(60);
    println!("{}", root.render(&wide).unwrap());

    println!("-- margin_1 = 20 --");
    let narrow = Options::new().with_margin_0(4).with_margin_1(20);
    println!("{}", root.render(&narrow).unwrap());
}
