// Copyright 2025 PRAGMA
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{
    Metadata, TransactionBody, TransactionId, WitnessSet, blake2b_256, cbor, heterogeneous_array,
    tee,
};

/// A signed transaction: `[body, witnesses, metadata / null]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    pub body: TransactionBody,
    pub witness_set: WitnessSet,
    pub metadata: Option<Metadata>,
}

impl Transaction {
    pub fn new(body: TransactionBody, witness_set: WitnessSet, metadata: Option<Metadata>) -> Self {
        Self {
            id: body.id(),
            body,
            witness_set,
            metadata,
        }
    }

    /// Hash of the body bytes as they were received, or as they were produced.
    pub fn id(&self) -> TransactionId {
        self.id
    }
}

impl<C> cbor::encode::Encode<C> for Transaction {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(3)?;
        e.encode_with(&self.body, ctx)?;
        e.encode_with(&self.witness_set, ctx)?;
        match &self.metadata {
            Some(metadata) => e.encode_with(metadata, ctx)?,
            None => e.null()?,
        };
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Transaction {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        heterogeneous_array(d, |d, assert_len| {
            assert_len(3)?;

            let (body, body_bytes) = tee(d, |d| d.decode_with(ctx))?;

            let witness_set = d.decode_with(ctx)?;

            let metadata = if d.datatype()? == cbor::data::Type::Null {
                d.null()?;
                None
            } else {
                Some(d.decode_with(ctx)?)
            };

            Ok(Transaction {
                id: blake2b_256(body_bytes),
                body,
                witness_set,
                metadata,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Address, from_cbor_no_leftovers, to_cbor};
    use pretty_assertions::assert_eq;

    const TRANSACTION: &str = "83a400818258201af8fa0b754ff99253d983894e63a2b09cbb56c833ba18c3384210163f63dcfc00018182582b82d818582183581c9e1c71de652ec8b85fec296f0685ca3988781c94a2e1a5d89d92f45fa0001a0d0c25611a002dd2e802182a030aa1028184582089053545a6c254b0d9b1464e48d2b5fcf91d4e25c128afb1fcfc61d0843338ea5840da07ac5246e3f20ebd1276476a4ae34a019dd4b264ffc22eea3c28cb0f1a6bb1c7764adeecf56bcb0bc6196fd1dbe080f3a7ef5b49f56980fe5b2881a4fdfa00582026308151516f3b0e02bb1638142747863c520273ce9bd3e5cd91e1d46fe2a63541a0f6";

    #[test]
    fn decode_signed_transaction() {
        let bytes = hex::decode(TRANSACTION).unwrap();
        let transaction: Transaction = from_cbor_no_leftovers(&bytes).unwrap();

        assert_eq!(
            transaction.id().to_string(),
            "73e09bdebf98a9e0f17f86a2d11e0f14f4f8dae77cdf26ff1678e821f20c8db6"
        );
        assert_eq!(transaction.body.id(), transaction.id());
        assert!(matches!(
            transaction.body.outputs[0].address,
            Address::Byron(..)
        ));
        assert_eq!(transaction.body.outputs[0].amount, 3003112);
        assert!(transaction.witness_set.vkey_witnesses.is_empty());
        assert_eq!(transaction.witness_set.bootstrap_witnesses.len(), 1);
        assert_eq!(transaction.metadata, None);

        assert_eq!(hex::encode(to_cbor(&transaction)), TRANSACTION);
    }

    #[test]
    fn indefinite_body_keeps_its_original_id() {
        // The same single-output body as above, with the inputs wrapped in an indefinite array.
        let definite = hex::decode(TRANSACTION).unwrap();
        let mut bytes = vec![0x83, 0xa4, 0x00, 0x9f];
        bytes.extend_from_slice(&definite[4..40]);
        bytes.push(0xff);
        bytes.extend_from_slice(&definite[40..]);

        let transaction: Transaction = from_cbor_no_leftovers(&bytes).unwrap();
        assert_ne!(transaction.id(), transaction.body.id());
        assert_eq!(transaction.body.inputs.len(), 1);
    }

    #[test]
    fn metadata_is_kept_verbatim() {
        let body = TransactionBody::default();
        let metadata = Metadata::new(vec![0xa1, 0x00, 0x00]);
        let transaction = Transaction::new(body, WitnessSet::default(), Some(metadata.clone()));
        let bytes = to_cbor(&transaction);
        assert!(bytes.ends_with(&[0xa0, 0xa1, 0x00, 0x00]));
        assert_eq!(
            from_cbor_no_leftovers::<Transaction>(&bytes).unwrap().metadata,
            Some(metadata)
        );
    }
}
