use crate::analyzer::all_analyzers;

pub fn handle_list() -> crate::Result<()> {
    print!("{}", render_list());
    Ok(())
}

fn render_list() -> String {
    let mut output = String::from("Available analyzers:\n");
    for analyzer in all_analyzers() {
        let metadata = analyzer.metadata();
        let inputs: Vec<_> = metadata.inputs.iter().map(|c| c.as_str()).collect();
        output.push_str(&format!(
            "\n  {}\n    {}\n    inputs: {}\n",
            metadata.name,
            metadata.description,
            inputs.join(", ")
        ));
    }
    output
}
