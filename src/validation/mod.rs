//! Form validation: translated schemas for each wizard step.

mod ai_model;
mod exchange;
mod forms;
mod issue;
mod trading;
mod translator;

pub use ai_model::{create_ai_model_schema, AiModelSchema};
pub use exchange::{create_exchange_schema, ExchangeSchema};
pub use forms::{AiModelForm, ExchangeForm, TradingForm};
pub use issue::{ValidationErrors, ValidationIssue, Validator};
pub use trading::{
    create_copy_trading_strategy_schema, create_trading_strategy_schema, TradingStrategySchema,
};
pub use translator::{keys, MessageCatalog, Translator};
