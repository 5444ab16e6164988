use crate::error::Error;
use crate::pqueue::MinQueue;
use crate::symtab::SymbolTable;

#[test]
fn test_crud() {
    let mut table: SymbolTable<char, u32> = SymbolTable::new("test-symtab");
    assert!(table.is_empty());
    assert!(table.first().is_none());

    for (i, ch) in "qwerty".chars().enumerate() {
        assert!(table.insert(ch, i as u32).is_ok());
    }
    assert_eq!(table.len(), 6);
    assert_eq!(table.insert('w', 100), Err(Error::AlreadyPresent));
    assert_eq!(table.get(&'w'), Some(&1));
    assert_eq!(table.len(), 6);

    assert!(table.contains_key(&'t'));
    assert!(!table.contains_key(&'z'));
    assert_eq!(table.first(), Some((&'e', &2)));
    assert_eq!(table.last(), Some((&'y', &5)));

    assert_eq!(table.remove(&'w'), Some(1));
    assert!(table.insert('w', 100).is_ok());
    assert!(table.insert('z', 200).is_ok());
    assert_eq!(table.get(&'w'), Some(&100));

    assert_eq!(table.remove(&'q'), Some(0));
    assert_eq!(table.remove(&'q'), None);

    let keys: String = table.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, "ertwyz");
    let keys: String = table.iter().rev().map(|(k, _)| *k).collect();
    assert_eq!(keys, "zywtre");
    assert!(table.validate().is_ok());
}

#[test]
fn test_borrowed_key() {
    let mut table: SymbolTable<String, usize> = SymbolTable::new("test-symtab");
    for word in ["delta", "alpha", "charlie", "bravo"].iter() {
        table.insert(word.to_string(), word.len()).unwrap();
    }
    assert_eq!(table.get("charlie"), Some(&7));
    assert_eq!(table.remove("alpha"), Some(5));
    assert_eq!(table.first().map(|(k, _)| k.as_str()), Some("bravo"));
    assert!(table.validate().is_ok());
}

enum Huffman {
    Leaf(char),
    Join(usize, usize),
}

// assign prefix codes, merging the two lightest subtrees each round.
fn prefix_codes(freqs: &[(char, u64)]) -> SymbolTable<char, String> {
    let mut nodes: Vec<Huffman> = vec![];
    let mut queue: MinQueue<u64, usize> = MinQueue::new("huffman");
    for (ch, freq) in freqs.iter() {
        nodes.push(Huffman::Leaf(*ch));
        queue.push(*freq, nodes.len() - 1);
    }

    while queue.len() > 1 {
        let (w1, a) = queue.pop_min().unwrap();
        let (w2, b) = queue.pop_min().unwrap();
        nodes.push(Huffman::Join(a, b));
        queue.push(w1 + w2, nodes.len() - 1);
    }

    let mut table = SymbolTable::new("codes");
    let mut stack = match queue.pop_min() {
        Some((_, root)) => vec![(root, String::new())],
        None => vec![],
    };
    while let Some((index, code)) = stack.pop() {
        match &nodes[index] {
            Huffman::Leaf(ch) => table.insert(*ch, code).unwrap(),
            Huffman::Join(a, b) => {
                stack.push((*a, format!("{}0", code)));
                stack.push((*b, format!("{}1", code)));
            }
        }
    }
    table
}

#[test]
fn test_prefix_codes() {
    let freqs = [
        ('a', 45),
        ('b', 13),
        ('c', 12),
        ('d', 16),
        ('e', 9),
        ('f', 5),
    ];
    let table = prefix_codes(&freqs);
    assert_eq!(table.len(), 6);
    assert!(table.validate().is_ok());

    let cost: u64 = freqs
        .iter()
        .map(|(ch, freq)| freq * table.get(ch).unwrap().len() as u64)
        .sum();
    assert_eq!(cost, 224);
    assert_eq!(table.get(&'a').map(|code| code.len()), Some(1));
    assert_eq!(table.get(&'f').map(|code| code.len()), Some(4));

    // no code is a prefix of another.
    let codes: Vec<&String> = table.iter().map(|(_, code)| code).collect();
    for (i, x) in codes.iter().enumerate() {
        for (j, y) in codes.iter().enumerate() {
            assert!(i == j || !y.starts_with(x.as_str()));
        }
    }

    // encode and decode through the table.
    let text = "deadbeefcafe";
    let encoded: String = text.chars().map(|ch| table.get(&ch).unwrap().as_str()).collect();
    let mut decoded = String::new();
    let mut acc = String::new();
    for bit in encoded.chars() {
        acc.push(bit);
        if let Some((ch, _)) = table.iter().find(|(_, code)| **code == acc) {
            decoded.push(*ch);
            acc.clear();
        }
    }
    assert_eq!(decoded, text);
}
