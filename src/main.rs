use shardhash::map::HashMap;

fn main() {
    let mut m: HashMap<String, u32> = HashMap::new();

    for word in "the quick brown fox jumps over the lazy dog the fox runs".split_whitespace() {
        *m.get_or_insert_default(word.to_string()) += 1;
    }

    println!("{} distinct words", m.len());
    let mut counts: Vec<(&String, &u32)> = m.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (word, count) in &counts {
        println!("{word:>8} : {count}");
    }

    match m.at(&"fox".to_string()) {
        Ok(count) => println!("'fox' seen {count} times"),
        Err(e) => println!("lookup failed: {e}"),
    }

    match m.at(&"wolf".to_string()) {
        Ok(count) => println!("'wolf' seen {count} times"),
        Err(e) => println!("lookup failed: {e}"),
    }

    m.remove(&"dog".to_string());
    println!("after removing 'dog', {} distinct words remain", m.len());
}
