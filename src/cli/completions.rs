use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    mcsetup completions bash > ~/.bash_completion.d/mcsetup\n\n\
                  Generate zsh completions:\n    mcsetup completions zsh > ~/.zfunc/_mcsetup\n\n\
                  Generate fish completions:\n    mcsetup completions fish > ~/.config/fish/completions/mcsetup.fish\n\n\
                  Generate PowerShell completions:\n    mcsetup completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
