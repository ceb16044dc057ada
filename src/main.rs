use coinrank::cli::run;

fn main() -> anyhow::Result<()> {
    run()
}
