use anyhow::Result;

fn main() -> Result<()> {
    docline_cli::main_entry()
}
