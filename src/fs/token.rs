use super::FileSystem;
use crate::client::{Op, OpParams, Token, Transport};
use crate::Result;

impl<T: Transport> FileSystem<T> {
    pub fn get_delegation_token(&mut self, renewer: &str) -> Result<Token> {
        self.dispatcher
            .call(None, &OpParams::renewer(Op::GetDelegationToken, renewer))?
            .into_token()
    }

    pub fn get_delegation_tokens(&mut self, renewer: &str) -> Result<Vec<Token>> {
        self.dispatcher
            .call(None, &OpParams::renewer(Op::GetDelegationTokens, renewer))?
            .into_tokens()
    }

    /// Returns the token's new expiration time (ms since epoch)
    pub fn renew_delegation_token(&mut self, token: &str) -> Result<i64> {
        let params = OpParams::token(Op::RenewDelegationToken, token)?;
        self.dispatcher.call(None, &params)?.into_long()
    }

    pub fn cancel_delegation_token(&mut self, token: &str) -> Result<()> {
        let params = OpParams::token(Op::CancelDelegationToken, token)?;
        self.dispatcher.call(None, &params)?;
        Ok(())
    }
}
