//! # Lending Contract ABI
//!
//! Type-safe description of the lending contract's surface. The contract is
//! illustrative: nothing is deployed at [`VAULT_LENDER_ADDRESS`], and no
//! event is ever read back. The portal only needs enough structure to build
//! well-formed write calls and to print the ABI for inspection.
//!
//! ## Method Index
//!
//! | Method                  | Inputs                                              |
//! |-------------------------|-----------------------------------------------------|
//! | `submitLoanApplication` | purpose, collateralType, 4 × encrypted bytes, proof |
//! | `approveLoan`           | applicationId, vaultId, encrypted rate, proof       |
//! | `createVault`           | vaultName, encrypted liquidity, proof               |
//!
//! Events `ApplicationSubmitted` and `LoanApproved` are declared but unused.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::config::VAULT_LENDER_ADDRESS;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A call that does not match its method's declared inputs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("{method} takes {expected} arguments, got {got}")]
    ArityMismatch {
        method: ContractMethod,
        expected: usize,
        got: usize,
    },

    #[error("{method} argument {index} must be {expected}")]
    TypeMismatch {
        method: ContractMethod,
        index: usize,
        expected: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Methods & Events
// ---------------------------------------------------------------------------

/// State-changing methods of the lending contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractMethod {
    #[serde(rename = "submitLoanApplication")]
    SubmitLoanApplication,
    #[serde(rename = "approveLoan")]
    ApproveLoan,
    #[serde(rename = "createVault")]
    CreateVault,
}

impl ContractMethod {
    pub const ALL: [ContractMethod; 3] = [
        ContractMethod::SubmitLoanApplication,
        ContractMethod::ApproveLoan,
        ContractMethod::CreateVault,
    ];

    /// Method name on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ContractMethod::SubmitLoanApplication => "submitLoanApplication",
            ContractMethod::ApproveLoan => "approveLoan",
            ContractMethod::CreateVault => "createVault",
        }
    }

    /// Declared `(name, type)` inputs, in order.
    pub fn inputs(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ContractMethod::SubmitLoanApplication => &[
                ("_purpose", "string"),
                ("_collateralType", "string"),
                ("_requestedAmount", "bytes"),
                ("_collateralValue", "bytes"),
                ("_creditScore", "bytes"),
                ("_loanTerm", "bytes"),
                ("inputProof", "bytes"),
            ],
            ContractMethod::ApproveLoan => &[
                ("applicationId", "uint256"),
                ("vaultId", "uint256"),
                ("_interestRate", "bytes"),
                ("inputProof", "bytes"),
            ],
            ContractMethod::CreateVault => &[
                ("_vaultName", "string"),
                ("_initialLiquidity", "bytes"),
                ("inputProof", "bytes"),
            ],
        }
    }
}

impl std::fmt::Display for ContractMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Events the contract declares. The portal never subscribes to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    ApplicationSubmitted,
    LoanApproved,
}

impl ContractEvent {
    /// Declared `(name, type, indexed)` inputs.
    pub fn inputs(&self) -> &'static [(&'static str, &'static str, bool)] {
        match self {
            ContractEvent::ApplicationSubmitted => &[
                ("applicationId", "uint256", true),
                ("borrower", "address", true),
                ("purpose", "string", false),
            ],
            ContractEvent::LoanApproved => &[
                ("applicationId", "uint256", true),
                ("loanId", "uint256", true),
                ("borrower", "address", true),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// ABI JSON
// ---------------------------------------------------------------------------

/// One parameter in an ABI entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One entry of the ABI array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
    pub inputs: Vec<AbiParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<AbiParam>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

fn param(name: &str, kind: &str) -> AbiParam {
    AbiParam {
        indexed: None,
        name: name.to_string(),
        kind: kind.to_string(),
    }
}

/// The full ABI: constructor, the two events, the three methods.
pub fn vault_lender_abi() -> Vec<AbiEntry> {
    let mut abi = vec![AbiEntry {
        anonymous: None,
        inputs: vec![param("_verifier", "address")],
        name: None,
        outputs: None,
        state_mutability: Some("nonpayable".into()),
        kind: "constructor".into(),
    }];

    for (event, name) in [
        (ContractEvent::ApplicationSubmitted, "ApplicationSubmitted"),
        (ContractEvent::LoanApproved, "LoanApproved"),
    ] {
        abi.push(AbiEntry {
            anonymous: Some(false),
            inputs: event
                .inputs()
                .iter()
                .map(|(n, k, indexed)| AbiParam {
                    indexed: Some(*indexed),
                    name: n.to_string(),
                    kind: k.to_string(),
                })
                .collect(),
            name: Some(name.into()),
            outputs: None,
            state_mutability: None,
            kind: "event".into(),
        });
    }

    for method in ContractMethod::ALL {
        abi.push(AbiEntry {
            anonymous: None,
            inputs: method.inputs().iter().map(|(n, k)| param(n, k)).collect(),
            name: Some(method.name().into()),
            outputs: Some(vec![param("", "uint256")]),
            state_mutability: Some("nonpayable".into()),
            kind: "function".into(),
        });
    }

    abi
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

/// A single call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContractArg {
    /// Plaintext `string`.
    Text(String),
    /// Plaintext `uint256` (ids only; amounts are always encoded).
    Uint(u64),
    /// `0x`-prefixed `bytes`.
    Bytes(String),
}

impl ContractArg {
    fn satisfies(&self, kind: &str) -> bool {
        match (self, kind) {
            (ContractArg::Text(_), "string") => true,
            (ContractArg::Uint(_), "uint256") => true,
            (ContractArg::Bytes(b), "bytes") => b.starts_with("0x"),
            _ => false,
        }
    }
}

/// A fully built write call, ready for a [`crate::wallet::ContractWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    /// Correlates log lines for one write.
    pub request_id: Uuid,
    pub address: String,
    #[serde(rename = "functionName")]
    pub method: ContractMethod,
    pub args: Vec<ContractArg>,
}

impl ContractCall {
    /// Builds a call against the hard-coded contract address.
    pub fn new(method: ContractMethod, args: Vec<ContractArg>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            address: VAULT_LENDER_ADDRESS.to_string(),
            method,
            args,
        }
    }

    /// Arguments as a JSON array, as a wallet library would receive them.
    pub fn args_json(&self) -> Value {
        serde_json::to_value(&self.args).unwrap_or(Value::Null)
    }

    /// Checks arity and argument kinds against the declared inputs.
    pub fn check(&self) -> Result<(), AbiError> {
        let inputs = self.method.inputs();
        if inputs.len() != self.args.len() {
            return Err(AbiError::ArityMismatch {
                method: self.method,
                expected: inputs.len(),
                got: self.args.len(),
            });
        }
        for (index, (arg, (_, kind))) in self.args.iter().zip(inputs).enumerate() {
            if !arg.satisfies(kind) {
                return Err(AbiError::TypeMismatch {
                    method: self.method,
                    index,
                    expected: *kind,
                });
            }
        }
        Ok(())
    }
}
