use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::application::reporting::{self, OutputFormat};
use crate::application::{AppError, LedgerService};
use crate::domain::{format_cents, parse_cents, AccountNumber, Cents};

const MENU: &str = "\n--- Banking Management System ---
1. Create Account
2. Deposit
3. Withdraw
4. Transfer
5. Display Accounts
6. Display Transactions
7. Generate Report
8. Exit";

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateAccount,
    Deposit,
    Withdraw,
    Transfer,
    DisplayAccounts,
    DisplayTransactions,
    GenerateReport,
    Exit,
}

impl MenuChoice {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(MenuChoice::CreateAccount),
            2 => Some(MenuChoice::Deposit),
            3 => Some(MenuChoice::Withdraw),
            4 => Some(MenuChoice::Transfer),
            5 => Some(MenuChoice::DisplayAccounts),
            6 => Some(MenuChoice::DisplayTransactions),
            7 => Some(MenuChoice::GenerateReport),
            8 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// A parsed operand, or how the menu should proceed when there is none.
type Operand<T> = std::result::Result<T, Flow>;

/// The interactive menu loop.
///
/// Reads a choice, prompts for operands line by line, calls into the
/// [`LedgerService`] and prints the outcome. Ledger errors are printed and
/// the menu comes back; only I/O failures end the session early. End of
/// input is treated like choosing Exit.
pub struct Session<R, W> {
    service: LedgerService,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(service: LedgerService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn into_parts(self) -> (LedgerService, W) {
        (self.service, self.output)
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let line = match self.prompt("Enter your choice: ")? {
                Some(line) => line,
                None => break,
            };

            let flow = match MenuChoice::from_input(&line) {
                Some(choice) => self.dispatch(choice)?,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        self.log_integrity();
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::CreateAccount => self.create_account(),
            MenuChoice::Deposit => self.deposit(),
            MenuChoice::Withdraw => self.withdraw(),
            MenuChoice::Transfer => self.transfer(),
            MenuChoice::DisplayAccounts => self.show_accounts().map(|_| Flow::Continue),
            MenuChoice::DisplayTransactions => self.show_transactions().map(|_| Flow::Continue),
            MenuChoice::GenerateReport => self.show_report().map(|_| Flow::Continue),
            MenuChoice::Exit => {
                writeln!(self.output, "Exiting...")?;
                Ok(Flow::Exit)
            }
        }
    }

    fn create_account(&mut self) -> Result<Flow> {
        let number = match self.read_account("Enter account number: ")? {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let name = match self.read_field("Enter account holder name: ", |s| Ok(s.to_string()))? {
            Ok(name) => name,
            Err(flow) => return Ok(flow),
        };

        match self.service.create_account(number, &name) {
            Ok(account) => writeln!(
                self.output,
                "Account created successfully. Account number: {}",
                account.number
            )?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn deposit(&mut self) -> Result<Flow> {
        let number = match self.read_account("Enter account number: ")? {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let amount = match self.read_amount("Enter amount to deposit: ")? {
            Ok(amount) => amount,
            Err(flow) => return Ok(flow),
        };

        match self.service.deposit(number, amount) {
            Ok(receipt) => writeln!(
                self.output,
                "Deposited {} into account {}. New balance: {}",
                format_cents(amount),
                number,
                format_cents(receipt.balance)
            )?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self) -> Result<Flow> {
        let number = match self.read_account("Enter account number: ")? {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let amount = match self.read_amount("Enter amount to withdraw: ")? {
            Ok(amount) => amount,
            Err(flow) => return Ok(flow),
        };

        match self.service.withdraw(number, amount) {
            Ok(receipt) => writeln!(
                self.output,
                "Withdrew {} from account {}. New balance: {}",
                format_cents(amount),
                number,
                format_cents(receipt.balance)
            )?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn transfer(&mut self) -> Result<Flow> {
        let from = match self.read_account("Enter source account number: ")? {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let to = match self.read_account("Enter destination account number: ")? {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let amount = match self.read_amount("Enter amount to transfer: ")? {
            Ok(amount) => amount,
            Err(flow) => return Ok(flow),
        };

        match self.service.transfer(from, to, amount) {
            Ok(receipt) => writeln!(
                self.output,
                "Transferred {} from account {} to account {}.",
                format_cents(receipt.amount()),
                from,
                to
            )?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn show_accounts(&mut self) -> Result<()> {
        let accounts = self.service.accounts();
        match self.format {
            OutputFormat::Table => {
                for line in reporting::display_accounts(accounts) {
                    writeln!(self.output, "{}", line)?;
                }
            }
            OutputFormat::Json => {
                let json = reporting::accounts_json(accounts).context("Failed to render accounts")?;
                writeln!(self.output, "{}", json)?;
            }
        }
        Ok(())
    }

    fn show_transactions(&mut self) -> Result<()> {
        let log = self.service.transactions();
        match self.format {
            OutputFormat::Table => {
                for line in reporting::display_transactions(log) {
                    writeln!(self.output, "{}", line)?;
                }
            }
            OutputFormat::Json => {
                let json = reporting::transactions_json(log).context("Failed to render transactions")?;
                writeln!(self.output, "{}", json)?;
            }
        }
        Ok(())
    }

    fn show_report(&mut self) -> Result<()> {
        let accounts = self.service.accounts();
        match self.format {
            OutputFormat::Table => {
                for line in reporting::generate_report(accounts) {
                    writeln!(self.output, "{}", line)?;
                }
            }
            OutputFormat::Json => {
                let json = reporting::report_json(accounts).context("Failed to render report")?;
                writeln!(self.output, "{}", json)?;
            }
        }
        Ok(())
    }

    // ========================
    // Input handling
    // ========================

    /// Print `label` and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for one operand. Unparseable input is reported and abandons
    /// the current operation; end of input ends the session.
    fn read_field<T>(
        &mut self,
        label: &str,
        parse: impl FnOnce(&str) -> std::result::Result<T, String>,
    ) -> Result<Operand<T>> {
        let Some(line) = self.prompt(label)? else {
            return Ok(Err(Flow::Exit));
        };
        match parse(&line) {
            Ok(value) => Ok(Ok(value)),
            Err(reason) => {
                writeln!(self.output, "Invalid input: {}", reason)?;
                Ok(Err(Flow::Continue))
            }
        }
    }

    fn read_account(&mut self, label: &str) -> Result<Operand<AccountNumber>> {
        self.read_field(label, |s| {
            s.parse::<AccountNumber>()
                .map_err(|_| format!("'{}' is not an account number", s))
        })
    }

    fn read_amount(&mut self, label: &str) -> Result<Operand<Cents>> {
        self.read_field(label, |s| parse_cents(s).map_err(|e| e.to_string()))
    }

    fn report_error(&mut self, err: &AppError) -> Result<()> {
        writeln!(self.output, "Error: {}", err)?;
        Ok(())
    }

    fn log_integrity(&self) {
        let report = self.service.verify();
        if report.is_healthy() {
            debug!(
                accounts = report.account_count,
                transactions = report.transaction_count,
                "ledger consistent"
            );
        } else {
            for issue in &report.issues {
                warn!(%issue, "ledger integrity issue");
            }
        }
    }
}
