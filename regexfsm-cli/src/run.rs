use crate::error::CliError;
use crate::{BatchArgs, CompileArgs};
use regexfsm::graph::GraphDescription;
use regexfsm::{batch, compile, graph, Compiled};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Compiles and simulates one job, printing a one-line summary in the style of a batch-file
/// report: regex, decoded word, postfix tokens, and the three simulators' verdicts.
fn run_job(regex: &str, w: &str, alphabet: Option<&HashSet<char>>, out: Option<&Path>) -> Result<bool, CliError> {
    let compiled = compile(regex, alphabet).map_err(|e| CliError::Compile(regex.to_string(), e))?;
    log::info!("compiled {regex:?}: {} nfa states, {} dfa states, {} min_dfa states",
        compiled.nfa.states().len(), compiled.dfa.states().len(), compiled.min_dfa.states().len());
    let result = compiled.simulate(w);

    let postfix: Vec<String> = compiled.postfix.iter().map(|t| t.display_label()).collect();
    println!(
        "{regex} ; {w:?} -> postfix [{}] | nfa={} dfa={} min_dfa={}{}",
        postfix.join(" "),
        result.accept_nfa,
        result.accept_dfa,
        result.accept_min_dfa,
        if result.is_consistent() { "" } else { " (SIMULATORS DISAGREE)" }
    );

    if let Some(dir) = out {
        write_artifacts(dir, &compiled)?;
    }

    Ok(result.accepted())
}

fn write_artifacts(dir: &Path, compiled: &Compiled) -> Result<(), CliError> {
    fs::create_dir_all(dir).map_err(|e| CliError::WriteFile(dir.to_path_buf(), e))?;
    let artifacts = [
        ("tree", graph::from_tree(&compiled.tree)),
        ("nfa", graph::from_nfa(&compiled.nfa)),
        ("dfa", graph::from_dfa(&compiled.dfa)),
        ("min_dfa", graph::from_min_dfa(&compiled.min_dfa)),
    ];
    for (name, description) in artifacts {
        let path = dir.join(format!("{name}.txt"));
        fs::write(&path, render_graph(&description)).map_err(|e| CliError::WriteFile(path, e))?;
    }
    Ok(())
}

/// Plain-text node/edge dump of a graph description. Rendering an actual image is an external
/// collaborator's job; this is the data a renderer would consume.
fn render_graph(graph: &GraphDescription) -> String {
    let mut out = String::new();
    for node in &graph.nodes {
        let shape = match node.shape {
            graph::NodeShape::Circle => "circle",
            graph::NodeShape::DoubleCircle => "double-circle",
            graph::NodeShape::Point => "point",
        };
        out.push_str(&format!("node {} {} {:?}\n", node.id, shape, node.label));
    }
    for edge in &graph.edges {
        out.push_str(&format!("edge {} -> {} {:?}\n", edge.from, edge.to, edge.label));
    }
    out
}

/// Whitespace is skipped by the tokenizer and can never appear as a literal, so it can never be
/// a meaningful member of `--alphabet`.
fn parse_alphabet(spec: &str) -> Result<HashSet<char>, CliError> {
    if let Some(c) = spec.chars().find(|c| c.is_whitespace()) {
        return Err(CliError::BadAlphabet(c));
    }
    Ok(spec.chars().collect())
}

pub(crate) fn run_compile(args: &CompileArgs) -> Result<bool, CliError> {
    let alphabet = args.alphabet.as_deref().map(parse_alphabet).transpose()?;
    run_job(&args.regex, &args.word, alphabet.as_ref(), args.out.as_deref())
}

pub(crate) fn run_batch(args: &BatchArgs) -> Result<bool, CliError> {
    let contents = fs::read_to_string(&args.file).map_err(|e| CliError::ReadFile(args.file.clone(), e))?;

    let mut all_accepted = true;
    for (line_no, line) in contents.lines().enumerate() {
        let Some((regex, raw_word)) = batch::parse_line(line) else {
            continue;
        };
        let w = batch::decode_word_literal(&raw_word);
        let job_out = args.out.as_deref().map(|dir| dir.join(format!("line-{}", line_no + 1)));

        match run_job(&regex, &w, None, job_out.as_deref()) {
            Ok(accepted) => all_accepted &= accepted,
            Err(e) => {
                eprintln!("line {}: {e}", line_no + 1);
                all_accepted = false;
            }
        }
    }

    Ok(all_accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_alphabet_accepts_plain_characters() {
        let alphabet = parse_alphabet("abc").unwrap();
        assert_eq!(alphabet, HashSet::from(['a', 'b', 'c']));
    }

    #[test]
    fn parse_alphabet_rejects_whitespace() {
        let err = parse_alphabet("a b").unwrap_err();
        assert!(matches!(err, CliError::BadAlphabet(' ')));
    }
}
